//! # Session Errors

use thiserror::Error;

use crate::history::HistoryError;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors a single request can fail with
///
/// None of these end the session; each becomes an error response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Unknown repository: {0}")]
    UnknownRepository(String),

    #[error("Repository already exists: {0}")]
    RepositoryExists(String),

    #[error("Repository limit reached: {0}")]
    RepositoryLimit(usize),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Cannot synchronize repository with itself: {0}")]
    SelfSynchronize(String),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl SessionError {
    /// Stable error code for responses
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::UnknownRepository(_) => "MINIGIT_UNKNOWN_REPOSITORY",
            SessionError::RepositoryExists(_) => "MINIGIT_REPOSITORY_EXISTS",
            SessionError::RepositoryLimit(_) => "MINIGIT_REPOSITORY_LIMIT",
            SessionError::MalformedRequest(_) => "MINIGIT_MALFORMED_REQUEST",
            SessionError::SelfSynchronize(_) => "MINIGIT_SELF_SYNCHRONIZE",
            SessionError::History(e) => e.code(),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::MalformedRequest(e.to_string())
    }
}
