//! Upload an EDID binary to an EDID emulator device.
//!
//! Usage:
//!   edid-send /dev/ttyUSB0 monitor.edid
//!   edid-send --timeout-ms 5000 /dev/ttyUSB0 monitor.edid
//!   edid-send --list
//!
//! The file contents are streamed to the device byte-for-byte, with no
//! framing or checksum. No output on success; set RUST_LOG=debug for
//! protocol traces.

use clap::Parser;
use edid_emu_tools::{constants, EdidEmu, Result};
use log::info;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serial port device path
    #[arg(required_unless_present = "list")]
    port: Option<String>,

    /// Path to the EDID binary to upload
    #[arg(required_unless_present = "list")]
    edid_file: Option<PathBuf>,

    /// Baud rate
    #[arg(long, default_value_t = constants::BAUD_RATE)]
    baud: u32,

    /// Read timeout in milliseconds
    #[arg(long, default_value_t = constants::TIMEOUT_MS)]
    timeout_ms: u64,

    /// List available serial ports and exit
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list {
        for port in EdidEmu::list_ports()? {
            println!("{} - {:?}", port.port_name, port.port_type);
        }
        return Ok(());
    }

    let (Some(port_name), Some(edid_file)) = (args.port, args.edid_file) else {
        // clap requires PORT and EDID_FILE unless --list is given
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "PORT and EDID_FILE are required",
        )
        .into());
    };

    info!("Uploading {} via {}", edid_file.display(), port_name);
    let sent = EdidEmu::upload_edid_file(
        &port_name,
        args.baud,
        Duration::from_millis(args.timeout_ms),
        &edid_file,
    )?;

    info!("Uploaded {} bytes", sent);
    Ok(())
}
