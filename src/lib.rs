//! # EDID Emulator Tools
//!
//! Host-side library and command-line tools for driving an EDID emulator
//! device over a serial (UART) connection. The device exposes a simple
//! single-letter command protocol: the host resynchronizes the firmware's
//! parser with a break condition, then issues ASCII commands to measure the
//! incoming pixel clock or reprogram the emulated EDID.
//!
//! ## Features
//!
//! - Read back the pixel clock measured by the device (`C` command)
//! - Upload a raw EDID blob into the device's programming bank (`H`/`E`)
//! - Configurable read timeout instead of indefinite blocking
//! - Serial port enumeration
//!
//! ## Example
//!
//! ```no_run
//! use edid_emu_tools::EdidEmu;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut emu = EdidEmu::new("/dev/ttyUSB0")?;
//!     let clock = emu.measure_clock()?;
//!     println!("{}", clock);
//!     Ok(())
//! }
//! ```

pub mod constants;
pub mod error;
pub mod link;
pub mod protocol;

pub use error::{EmuError, Result};
pub use protocol::EdidEmu;
