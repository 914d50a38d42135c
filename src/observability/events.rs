//! Observable events
//!
//! Events are explicit and typed. Each maps to a stable upper-snake name
//! used as the `event` key of a log line.

use std::fmt;

use super::Severity;

/// Observable events in a minigit session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Session lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Session ready for requests
    SessionStart,
    /// Input exhausted, session finished
    SessionEnd,

    // History operations
    /// Repository created
    RepositoryCreated,
    /// Commit recorded
    CommitCreated,
    /// Commit removed
    CommitDropped,
    /// Drop requested for an id not in the repository
    DropMissed,
    /// Merge of two repositories begins
    SyncBegin,
    /// Merge of two repositories complete
    SyncComplete,

    // Requests
    /// Request rejected with an error response
    RequestRejected,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SessionStart => "SESSION_START",
            Event::SessionEnd => "SESSION_END",
            Event::RepositoryCreated => "REPOSITORY_CREATED",
            Event::CommitCreated => "COMMIT_CREATED",
            Event::CommitDropped => "COMMIT_DROPPED",
            Event::DropMissed => "DROP_MISSED",
            Event::SyncBegin => "SYNC_BEGIN",
            Event::SyncComplete => "SYNC_COMPLETE",
            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::CommitCreated | Event::CommitDropped | Event::DropMissed => Severity::Trace,
            Event::RequestRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
