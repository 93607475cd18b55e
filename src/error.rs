//! Channel error type.

/// Status code reported to the host for a failed open/close.
pub const STATUS_FAILURE: i32 = -1;

/// Status code reported to the host for a successful open/close.
pub const STATUS_OK: i32 = 0;

/// Failure talking to the device driver.
///
/// None of these are fatal: the owner of the channel logs them and stops
/// polling until the channel is reopened.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The driver or device could not be reached.
    #[error("device unavailable: {0}")]
    Unavailable(String),

    /// The operation needs an open connection and there is none.
    #[error("channel is not open")]
    NotOpen,

    /// The driver closed the connection; the channel is now closed.
    #[error("device disconnected: {0}")]
    Disconnected(String),

    #[error("I/O error on device channel: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "hid")]
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),
}

impl ChannelError {
    /// Integer status for host commands. Every failure maps to `-1`.
    pub fn status_code(&self) -> i32 {
        STATUS_FAILURE
    }
}
