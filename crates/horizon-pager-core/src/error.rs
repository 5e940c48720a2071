//! Error types for Horizon Pager.

/// The main error type for Horizon Pager core operations.
#[derive(Debug, thiserror::Error)]
pub enum PagerError {
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid or has already been removed.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
    /// A timer was requested with a zero interval.
    #[error("Timer interval must be greater than zero")]
    ZeroInterval,
}

/// A specialized Result type for Horizon Pager core operations.
pub type Result<T> = std::result::Result<T, PagerError>;
