//! Read back the pixel clock measured by an EDID emulator device.
//!
//! Usage:
//!   clk-measure /dev/ttyUSB0
//!   clk-measure --timeout-ms 5000 /dev/ttyUSB0
//!   clk-measure --list
//!
//! Prints the measured clock as a decimal integer on standard output.
//! Set RUST_LOG=debug for protocol traces.

use clap::Parser;
use edid_emu_tools::{constants, EdidEmu, Result};
use log::info;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serial port device path
    #[arg(required_unless_present = "list")]
    port: Option<String>,

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

    let Some(port_name) = args.port else {
        // clap requires PORT unless --list is given
        return Err(
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "PORT is required").into(),
        );
    };

    info!("Measuring clock on {}...", port_name);
    let mut emu =
        EdidEmu::with_settings(&port_name, args.baud, Duration::from_millis(args.timeout_ms))?;
    let clock = emu.measure_clock()?;

    println!("{}", clock);
    Ok(())
}
