//! CommitIdAllocator - Shared commit identity assignment
//!
//! - Identities are assigned exactly once
//! - Assignment is a single atomic fetch-and-increment
//! - One allocator may back any number of histories
//!
//! The process-wide allocator returned by `global()` is what
//! `CommitHistory::new` uses, so ids never collide across histories
//! constructed independently. Histories that need an isolated sequence
//! (tests, embedders) inject their own allocator through `HistoryContext`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use super::CommitId;

static GLOBAL: OnceLock<Arc<CommitIdAllocator>> = OnceLock::new();

/// Allocator for commit identities.
#[derive(Debug, Default)]
pub struct CommitIdAllocator {
    /// The value the next call to `allocate` hands out.
    next: AtomicU64,
}

impl CommitIdAllocator {
    /// Create an allocator whose first id is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// The process-wide allocator.
    pub fn global() -> Arc<CommitIdAllocator> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(CommitIdAllocator::new())))
    }

    /// Assign the next identity.
    pub fn allocate(&self) -> CommitId {
        CommitId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The identity the next `allocate` call would return.
    pub fn peek(&self) -> CommitId {
        CommitId::new(self.next.load(Ordering::Relaxed))
    }

    /// Restart the sequence at 0.
    ///
    /// Ids handed out before the reset may be handed out again, so this is
    /// only meaningful once every history using the allocator is discarded.
    pub fn reset(&self) {
        self.next.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_new_allocator_starts_at_zero() {
        let allocator = CommitIdAllocator::new();
        assert_eq!(allocator.peek(), CommitId::new(0));
        assert_eq!(allocator.allocate(), CommitId::new(0));
    }

    #[test]
    fn test_allocate_is_strictly_increasing() {
        let allocator = CommitIdAllocator::new();
        for i in 0..10 {
            assert_eq!(allocator.allocate(), CommitId::new(i));
        }
        assert_eq!(allocator.peek(), CommitId::new(10));
    }

    #[test]
    fn test_starting_at() {
        let allocator = CommitIdAllocator::starting_at(100);
        assert_eq!(allocator.allocate(), CommitId::new(100));
        assert_eq!(allocator.allocate(), CommitId::new(101));
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let allocator = CommitIdAllocator::new();
        allocator.allocate();
        allocator.allocate();
        allocator.reset();
        assert_eq!(allocator.allocate(), CommitId::new(0));
    }

    #[test]
    fn test_global_is_shared() {
        let a = CommitIdAllocator::global();
        let b = CommitIdAllocator::global();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_concurrent_allocation_never_duplicates() {
        let allocator = Arc::new(CommitIdAllocator::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let allocator = Arc::clone(&allocator);
                thread::spawn(move || (0..250).map(|_| allocator.allocate()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
