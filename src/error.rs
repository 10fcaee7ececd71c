//! Error types for EDID emulator operations.

use thiserror::Error;

/// Result type alias for emulator operations.
pub type Result<T> = std::result::Result<T, EmuError>;

/// Error types for EDID emulator communication.
#[derive(Error, Debug)]
pub enum EmuError {
    /// Serial port communication error
    #[error("Serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Communication timeout (device did not respond)
    #[error("Device did not respond within the read timeout")]
    Timeout,

    /// Response didn't match expected format
    #[error("Invalid response: expected {expected}, got {actual}")]
    InvalidResponse {
        /// Expected response format
        expected: String,
        /// Actual response received
        actual: String,
    },
}
