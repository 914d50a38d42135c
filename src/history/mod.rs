//! Commit history domain
//!
//! This module provides:
//! - `CommitId` - Unique commit identity
//! - `CommitIdAllocator` - Shared identity assignment
//! - `Clock` - Commit timestamp source
//! - `Commit` - Immutable commit record
//! - `CommitHistory` - Named newest-first chain with chronological merge
//!
//! # Ownership
//!
//! A history owns its commits through boxed links. `synchronize` moves
//! commits from one history to another; nothing is shared or copied.

mod allocator;
mod chain;
mod clock;
mod commit;
mod commit_id;
mod context;
mod errors;

pub use allocator::CommitIdAllocator;
pub use chain::{CommitHistory, Iter};
pub use clock::{Clock, ManualClock, SystemClock};
pub use commit::{Commit, CommitRecord, TIMESTAMP_FORMAT};
pub use commit_id::CommitId;
pub use context::HistoryContext;
pub use errors::{HistoryError, HistoryResult};
