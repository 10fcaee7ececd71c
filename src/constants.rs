//! Protocol constants for the EDID emulator's serial command interface.
//!
//! The device speaks a single-letter command protocol: each exchange starts
//! with a break condition to resynchronize its parser, followed by an ASCII
//! command byte (plus a bank digit for `H`).

/// Request a clock measurement; the device replies with 8 ASCII hex digits
/// followed by CR LF.
pub const CMD_MEASURE_CLOCK: u8 = b'C';

/// Enter EDID programming mode (bank 0)
pub const CMD_PROGRAM_ENTER: &[u8] = b"H0";

/// Exit EDID programming mode (bank 1)
pub const CMD_PROGRAM_EXIT: &[u8] = b"H1";

/// Begin EDID upload; the raw blob follows immediately with no framing
pub const CMD_EDID_WRITE: u8 = b'E';

/// Length of the clock value in the device's response (ASCII hex digits)
pub const CLOCK_DIGITS: usize = 8;

/// Length of the response terminator (CR LF)
pub const TERMINATOR_LEN: usize = 2;

/// Length of an `H` command acknowledgement (status digit + CR LF)
pub const ACK_LEN: usize = 3;

/// Baud rate (115200 bps)
pub const BAUD_RATE: u32 = 115_200;

/// Default read timeout in milliseconds
pub const TIMEOUT_MS: u64 = 2000;

/// Duration to hold the break condition
pub const BREAK_DURATION_MS: u64 = 250;
