//! minigit - An in-memory, single-branch commit history
//!
//! Histories are named chains of immutable commits, newest first, that
//! support lookup, bounded rendering, removal, and a chronological merge
//! that moves every commit of one history into another.

pub mod cli;
pub mod history;
pub mod observability;
pub mod session;
