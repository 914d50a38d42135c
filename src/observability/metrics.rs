//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for a session
///
/// Relaxed ordering throughout; counters are exact but not a
/// synchronization point.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    histories_created: AtomicU64,
    commits_created: AtomicU64,
    commits_dropped: AtomicU64,
    drop_misses: AtomicU64,
    synchronizations: AtomicU64,
    commits_transferred: AtomicU64,
    requests_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment histories created
    pub fn increment_histories_created(&self) {
        self.histories_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment commits created
    pub fn increment_commits_created(&self) {
        self.commits_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a drop
    pub fn record_drop(&self, removed: bool) {
        if removed {
            self.commits_dropped.fetch_add(1, Ordering::Relaxed);
        } else {
            self.drop_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a synchronization that moved `transferred` commits
    pub fn record_synchronization(&self, transferred: u64) {
        self.synchronizations.fetch_add(1, Ordering::Relaxed);
        self.commits_transferred
            .fetch_add(transferred, Ordering::Relaxed);
    }

    /// Increment requests rejected
    pub fn increment_requests_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            histories_created: self.histories_created.load(Ordering::Relaxed),
            commits_created: self.commits_created.load(Ordering::Relaxed),
            commits_dropped: self.commits_dropped.load(Ordering::Relaxed),
            drop_misses: self.drop_misses.load(Ordering::Relaxed),
            synchronizations: self.synchronizations.load(Ordering::Relaxed),
            commits_transferred: self.commits_transferred.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Serializable copy of the registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub histories_created: u64,
    pub commits_created: u64,
    pub commits_dropped: u64,
    pub drop_misses: u64,
    pub synchronizations: u64,
    pub commits_transferred: u64,
    pub requests_rejected: u64,
}
