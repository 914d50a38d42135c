//! Commit - Immutable record of one change
//!
//! - Identity, message and timestamp are fixed at creation
//! - The only mutable part is the link to the next-older commit,
//!   and only the owning history touches it
//! - Commits are created by `CommitHistory::commit`, never standalone

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::CommitId;

/// Owned link to the next-older commit.
pub(crate) type Link = Option<Box<Commit>>;

/// Display format for commit timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f UTC";

/// A single commit in a history chain.
///
/// All fields are private. `next` is crate-visible so removal and merge
/// can move boxed commits between links without copying them.
#[derive(Debug)]
pub struct Commit {
    id: CommitId,
    message: String,
    timestamp: DateTime<Utc>,
    pub(crate) next: Link,
}

impl Commit {
    pub(crate) fn new(id: CommitId, message: String, timestamp: DateTime<Utc>, next: Link) -> Self {
        Self {
            id,
            message,
            timestamp,
            next,
        }
    }

    /// Returns the commit identity.
    #[inline]
    pub fn id(&self) -> CommitId {
        self.id
    }

    /// Returns the commit message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the creation time.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the next-older commit in the same chain, if any.
    #[inline]
    pub fn older(&self) -> Option<&Commit> {
        self.next.as_deref()
    }

    /// Serializable snapshot of this commit, without its link.
    pub fn record(&self) -> CommitRecord {
        CommitRecord {
            id: self.id.to_string(),
            message: self.message.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// Renders `"<id> at <timestamp>: <message>"`.
impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}: {}",
            self.id,
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.message
        )
    }
}

/// Detached, serializable view of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
