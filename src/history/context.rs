//! HistoryContext - What a history stamps its commits with

use std::sync::Arc;

use super::{Clock, CommitIdAllocator, SystemClock};

/// Identity allocator and clock shared by one or more histories.
///
/// The default context uses the process-wide allocator and the system
/// clock.
#[derive(Debug, Clone)]
pub struct HistoryContext {
    ids: Arc<CommitIdAllocator>,
    clock: Arc<dyn Clock>,
}

impl HistoryContext {
    /// Creates a context from an explicit allocator and clock.
    pub fn new(ids: Arc<CommitIdAllocator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// Returns the identity allocator.
    pub fn ids(&self) -> &Arc<CommitIdAllocator> {
        &self.ids
    }

    /// Returns the clock.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

impl Default for HistoryContext {
    fn default() -> Self {
        Self::new(CommitIdAllocator::global(), Arc::new(SystemClock))
    }
}
