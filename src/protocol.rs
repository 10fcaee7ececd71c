use crate::constants::*;
use crate::error::{EmuError, Result};
use crate::link::{Link, SerialLink};
use log::{debug, trace};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Handle to an EDID emulator device on a serial port.
///
/// Each operation is a fixed, linear exchange: a break condition to reset the
/// device's command parser, one ASCII command, and a fixed-length response.
pub struct EdidEmu {
    link: Box<dyn Link>,
}

impl EdidEmu {
    /// Connect to the device at the default baud rate and read timeout.
    pub fn new(port_name: &str) -> Result<Self> {
        Self::with_settings(port_name, BAUD_RATE, Duration::from_millis(TIMEOUT_MS))
    }

    /// Connect with an explicit baud rate and read timeout.
    pub fn with_settings(port_name: &str, baud: u32, timeout: Duration) -> Result<Self> {
        let link = SerialLink::open(port_name, baud, timeout)?;
        Ok(EdidEmu {
            link: Box::new(link),
        })
    }

    /// List available serial ports
    pub fn list_ports() -> Result<Vec<serialport::SerialPortInfo>> {
        Ok(serialport::available_ports()?)
    }

    /// Request a clock measurement from the device.
    ///
    /// The device replies with 8 ASCII hex digits and a CR LF terminator;
    /// the parsed value is returned.
    pub fn measure_clock(&mut self) -> Result<u32> {
        self.link.send_break()?;
        self.link.send(&[CMD_MEASURE_CLOCK])?;

        let mut digits = [0u8; CLOCK_DIGITS];
        self.link.recv_exact(&mut digits)?;
        trace!("clock response: {:02X?}", digits);

        let value = std::str::from_utf8(&digits)
            .ok()
            .and_then(|s| u32::from_str_radix(s, 16).ok())
            .ok_or_else(|| EmuError::InvalidResponse {
                expected: "8 ASCII hex digits".to_string(),
                actual: format!("{:02X?}", digits),
            })?;

        // CR LF terminator, discarded
        let mut terminator = [0u8; TERMINATOR_LEN];
        self.link.recv_exact(&mut terminator)?;

        debug!("measured clock: {} Hz", value);
        Ok(value)
    }

    /// Upload an EDID blob to the device.
    ///
    /// The blob is written byte-for-byte with no framing, length prefix, or
    /// checksum; the device is switched into programming mode for the
    /// duration of the transfer.
    pub fn upload_edid(&mut self, edid: &[u8]) -> Result<()> {
        self.link.send_break()?;
        self.link.send(CMD_PROGRAM_ENTER)?;
        self.read_ack("H0")?;

        let mut upload = Vec::with_capacity(1 + edid.len());
        upload.push(CMD_EDID_WRITE);
        upload.extend_from_slice(edid);
        self.link.send(&upload)?;
        debug!("wrote {} EDID bytes", edid.len());

        self.link.send_break()?;
        self.link.send(CMD_PROGRAM_EXIT)?;
        self.read_ack("H1")?;

        Ok(())
    }

    /// Read an EDID binary from disk and upload it to the device.
    ///
    /// The file is read before the port is opened, so a missing or
    /// unreadable file fails without touching the device. Returns the
    /// number of EDID bytes sent.
    pub fn upload_edid_file(
        port_name: &str,
        baud: u32,
        timeout: Duration,
        path: &Path,
    ) -> Result<usize> {
        let edid = fs::read(path)?;
        let mut emu = EdidEmu::with_settings(port_name, baud, timeout)?;
        emu.upload_edid(&edid)?;
        Ok(edid.len())
    }

    /// Read and discard an `H` command acknowledgement (status digit + CR LF).
    ///
    /// The device does not document its status codes, so the byte is only
    /// logged, matching the discard-only behavior of the original host tools.
    fn read_ack(&mut self, command: &str) -> Result<()> {
        let mut ack = [0u8; ACK_LEN];
        self.link.recv_exact(&mut ack)?;
        debug!("{} ack: status byte {:02X}", command, ack[0]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// What the host put on the wire, in order.
    #[derive(Debug, PartialEq)]
    enum WireOp {
        Break,
        Write(Vec<u8>),
    }

    /// Scripted in-memory link: replays queued device responses and records
    /// every host write and break into a log shared with the test.
    struct MockLink {
        rx: VecDeque<u8>,
        ops: Rc<RefCell<Vec<WireOp>>>,
    }

    fn emu_with_response(response: &[u8]) -> (EdidEmu, Rc<RefCell<Vec<WireOp>>>) {
        let ops = Rc::new(RefCell::new(Vec::new()));
        let link = MockLink {
            rx: response.iter().copied().collect(),
            ops: Rc::clone(&ops),
        };
        let emu = EdidEmu {
            link: Box::new(link),
        };
        (emu, ops)
    }

    impl Link for MockLink {
        fn send(&mut self, bytes: &[u8]) -> Result<()> {
            self.ops.borrow_mut().push(WireOp::Write(bytes.to_vec()));
            Ok(())
        }

        fn recv_exact(&mut self, buf: &mut [u8]) -> Result<()> {
            if self.rx.len() < buf.len() {
                return Err(EmuError::Timeout);
            }
            for slot in buf.iter_mut() {
                *slot = self.rx.pop_front().ok_or(EmuError::Timeout)?;
            }
            Ok(())
        }

        fn send_break(&mut self) -> Result<()> {
            self.ops.borrow_mut().push(WireOp::Break);
            Ok(())
        }
    }

    #[test]
    fn measure_clock_parses_hex_response() {
        let (mut emu, ops) = emu_with_response(b"0001E240\r\n");

        let clock = emu.measure_clock().unwrap();
        assert_eq!(clock, 123_456);

        assert_eq!(
            *ops.borrow(),
            vec![WireOp::Break, WireOp::Write(vec![b'C'])]
        );
    }

    #[test]
    fn measure_clock_parses_max_value() {
        let (mut emu, _ops) = emu_with_response(b"FFFFFFFF\r\n");
        assert_eq!(emu.measure_clock().unwrap(), u32::MAX);
    }

    #[test]
    fn measure_clock_rejects_non_hex_response() {
        let (mut emu, _ops) = emu_with_response(b"not hex!\r\n");

        match emu.measure_clock() {
            Err(EmuError::InvalidResponse { expected, .. }) => {
                assert_eq!(expected, "8 ASCII hex digits");
            }
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn measure_clock_times_out_on_silent_device() {
        let (mut emu, _ops) = emu_with_response(b"");
        assert!(matches!(emu.measure_clock(), Err(EmuError::Timeout)));
    }

    #[test]
    fn measure_clock_times_out_on_missing_terminator() {
        let (mut emu, _ops) = emu_with_response(b"0001E240");
        assert!(matches!(emu.measure_clock(), Err(EmuError::Timeout)));
    }

    #[test]
    fn upload_edid_sends_exact_sequence() {
        // One ack each for H0 and H1
        let (mut emu, ops) = emu_with_response(b"0\r\n0\r\n");

        let edid: Vec<u8> = (0..=255).collect();
        emu.upload_edid(&edid).unwrap();

        let mut expected_upload = vec![b'E'];
        expected_upload.extend_from_slice(&edid);

        assert_eq!(
            *ops.borrow(),
            vec![
                WireOp::Break,
                WireOp::Write(b"H0".to_vec()),
                WireOp::Write(expected_upload),
                WireOp::Break,
                WireOp::Write(b"H1".to_vec()),
            ]
        );
    }

    #[test]
    fn upload_edid_payload_is_byte_exact() {
        let (mut emu, ops) = emu_with_response(b"0\r\n0\r\n");

        let edid = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x10, 0xAC];
        emu.upload_edid(&edid).unwrap();

        let ops = ops.borrow();
        match &ops[2] {
            WireOp::Write(bytes) => {
                assert_eq!(bytes[0], b'E');
                assert_eq!(&bytes[1..], &edid);
            }
            other => panic!("expected upload write, got {:?}", other),
        }
    }

    #[test]
    fn upload_edid_accepts_empty_blob() {
        let (mut emu, ops) = emu_with_response(b"0\r\n0\r\n");

        emu.upload_edid(&[]).unwrap();

        let ops = ops.borrow();
        assert_eq!(ops[2], WireOp::Write(vec![b'E']));
        assert_eq!(ops.len(), 5);
    }

    #[test]
    fn upload_edid_file_fails_before_opening_port_when_file_is_missing() {
        // The port path is also bogus: an Io error (not SerialPort) proves
        // the file read failed before any attempt to open the port.
        let err = EdidEmu::upload_edid_file(
            "/dev/ttyUSB-nonexistent",
            BAUD_RATE,
            Duration::from_millis(10),
            Path::new("/nonexistent/monitor.edid"),
        )
        .unwrap_err();
        assert!(matches!(err, EmuError::Io(_)));
    }

    #[test]
    fn upload_edid_times_out_on_short_ack() {
        let (mut emu, _ops) = emu_with_response(b"0\r");
        assert!(matches!(emu.upload_edid(&[0xAA]), Err(EmuError::Timeout)));
    }
}
