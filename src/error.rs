use std::fmt;

/// Failures of the status LED hardware path.
///
/// Every variant is fatal for the firmware: there is no retry and no partial
/// frame fallback. The binary propagates these out of `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    /// The RMT channel could not be allocated, configured or enabled.
    Config(i32),
    /// The frame could not be queued for transmission.
    Transmit(i32),
    /// The peripheral did not report completion within the bounded wait.
    Timeout,
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(code) => write!(f, "LED peripheral configuration failed (rc={code})"),
            Self::Transmit(code) => write!(f, "LED frame could not be queued (rc={code})"),
            Self::Timeout => write!(f, "LED frame transmission timed out"),
        }
    }
}

impl std::error::Error for LedError {}
