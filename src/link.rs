//! Byte-link abstraction over the serial port.

use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use serialport::{FlowControl, SerialPort};

use crate::constants::BREAK_DURATION_MS;
use crate::error::{EmuError, Result};

/// Everything the protocol layer needs from the transport: blocking writes,
/// exact-length reads, and the out-of-band break signal the device firmware
/// uses to reset its command parser.
pub trait Link {
    /// Write all of `bytes` to the device.
    fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read exactly `buf.len()` bytes from the device.
    ///
    /// Returns [`EmuError::Timeout`] if the device does not produce enough
    /// bytes within the configured read timeout.
    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Hold the line in a break condition long enough for the device to
    /// notice, then release it.
    fn send_break(&mut self) -> Result<()>;
}

/// [`Link`] backed by a real serial port.
///
/// The port handle is owned by the link and released when it is dropped, on
/// every exit path.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
}

impl SerialLink {
    /// Open `port_name` at `baud` with hardware flow control disabled.
    pub fn open(port_name: &str, baud: u32, timeout: Duration) -> Result<Self> {
        let port = serialport::new(port_name, baud)
            .flow_control(FlowControl::None)
            .timeout(timeout)
            .open()?;
        Ok(SerialLink { port })
    }
}

impl Link for SerialLink {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        Ok(())
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.port.read_exact(buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => EmuError::Timeout,
            _ => EmuError::Io(e),
        })
    }

    fn send_break(&mut self) -> Result<()> {
        self.port.set_break()?;
        thread::sleep(Duration::from_millis(BREAK_DURATION_MS));
        self.port.clear_break()?;
        Ok(())
    }
}
