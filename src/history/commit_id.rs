//! CommitId - Unique commit identity
//!
//! - Assigned exactly once, by a `CommitIdAllocator`
//! - Unique across every history sharing the allocator
//! - Rendered as a plain decimal string ("0", "1", ...)
//!
//! Identity carries no ordering meaning for history. Chronology comes from
//! commit timestamps only.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// An opaque, unique commit identity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CommitId(u64);

impl CommitId {
    /// Creates a CommitId with the given value.
    ///
    /// Histories never call this directly; ids come from the allocator.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CommitId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_id_value() {
        let id = CommitId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_commit_id_displays_as_decimal() {
        assert_eq!(CommitId::new(0).to_string(), "0");
        assert_eq!(CommitId::new(1234).to_string(), "1234");
    }

    #[test]
    fn test_commit_id_parses_from_display() {
        let id: CommitId = "17".parse().unwrap();
        assert_eq!(id, CommitId::new(17));
    }

    #[test]
    fn test_commit_id_rejects_non_numeric() {
        assert!("abc".parse::<CommitId>().is_err());
        assert!("".parse::<CommitId>().is_err());
        assert!("-1".parse::<CommitId>().is_err());
    }

    #[test]
    fn test_commit_id_hash_trait_exists() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(CommitId::new(1));
        set.insert(CommitId::new(2));
        set.insert(CommitId::new(1));

        assert_eq!(set.len(), 2);
    }
}
