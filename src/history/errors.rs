//! # History Errors

use thiserror::Error;

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// History errors
///
/// Only argument validation can fail. Lookups, removal and merge are
/// total and report absence through `None`/`false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl HistoryError {
    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        HistoryError::InvalidArgument(msg.into())
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            HistoryError::InvalidArgument(_) => "MINIGIT_INVALID_ARGUMENT",
        }
    }
}
