//! CommitHistory - A named chain of commits, newest first
//!
//! - `commit` pushes onto the head, so outside of merge the chain is in
//!   insertion order
//! - `drop` unlinks one commit and relinks its predecessor
//! - `synchronize` splices another history's chain into this one by
//!   descending timestamp and leaves the other history empty
//!
//! Commits are owned through `Option<Box<Commit>>` links. Removal and
//! merge move boxes from one link to another; no commit is ever copied or
//! shared between chains.

use std::fmt;

use super::commit::{Commit, Link};
use super::{CommitId, HistoryContext, HistoryError, HistoryResult};

/// A named, single-branch commit history.
#[derive(Debug)]
pub struct CommitHistory {
    name: String,
    head: Link,
    context: HistoryContext,
}

impl CommitHistory {
    /// Creates an empty history using the process-wide id allocator and
    /// the system clock.
    ///
    /// Fails if `name` is empty.
    pub fn new(name: impl Into<String>) -> HistoryResult<Self> {
        Self::with_context(name, HistoryContext::default())
    }

    /// Creates an empty history stamping commits from `context`.
    ///
    /// Fails if `name` is empty.
    pub fn with_context(name: impl Into<String>, context: HistoryContext) -> HistoryResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(HistoryError::invalid_argument(
                "repository name must not be empty",
            ));
        }
        Ok(Self {
            name,
            head: None,
            context,
        })
    }

    /// Returns the repository name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records a new commit on top of the current head and returns its id.
    pub fn commit(&mut self, message: impl Into<String>) -> CommitId {
        let id = self.context.ids().allocate();
        let timestamp = self.context.clock().now();
        let previous = self.head.take();
        self.head = Some(Box::new(Commit::new(id, message.into(), timestamp, previous)));
        id
    }

    /// Returns the id of the newest commit.
    pub fn head(&self) -> Option<CommitId> {
        self.head.as_deref().map(Commit::id)
    }

    /// Returns the newest commit.
    pub fn head_commit(&self) -> Option<&Commit> {
        self.head.as_deref()
    }

    /// Returns true if a commit with `id` is in this history.
    pub fn contains(&self, id: CommitId) -> bool {
        self.iter().any(|commit| commit.id() == id)
    }

    /// Number of commits in this history.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if this history has no commits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Iterates commits newest first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Renders the `n` most recent commits, newest first, one per line.
    ///
    /// Each line is the commit's `Display` form followed by `\n`. Returns
    /// an empty string for an empty history. Fails if `n` is 0.
    pub fn history(&self, n: usize) -> HistoryResult<String> {
        if n == 0 {
            return Err(HistoryError::invalid_argument(
                "history length must be positive",
            ));
        }
        let mut rendered = String::new();
        for commit in self.iter().take(n) {
            rendered.push_str(&commit.to_string());
            rendered.push('\n');
        }
        Ok(rendered)
    }

    /// Removes the newest commit whose id is `id`.
    ///
    /// Returns false and leaves the chain untouched when there is no such
    /// commit.
    pub fn drop(&mut self, id: CommitId) -> bool {
        let mut cursor = &mut self.head;
        loop {
            let is_target = match cursor.as_deref() {
                None => return false,
                Some(commit) => commit.id() == id,
            };
            if is_target {
                if let Some(mut removed) = cursor.take() {
                    *cursor = removed.next.take();
                }
                return true;
            }
            cursor = match cursor {
                Some(commit) => &mut commit.next,
                None => return false,
            };
        }
    }

    /// Moves every commit of `other` into this history.
    ///
    /// The result interleaves both chains by descending timestamp. A commit
    /// from `other` is placed ahead of one of ours only when it is strictly
    /// newer, so on equal timestamps our commit stays first. `other` is
    /// left empty.
    ///
    /// The result is fully ordered when each chain was ordered to begin
    /// with, which holds for chains built by `commit` on a clock that does
    /// not run backwards.
    pub fn synchronize(&mut self, other: &mut CommitHistory) {
        let mut incoming = other.head.take();
        let mut cursor = &mut self.head;

        loop {
            let step = match (cursor.as_deref(), incoming.as_deref()) {
                (_, None) => Step::Done,
                (None, Some(_)) => Step::Append,
                (Some(resident), Some(arriving)) if arriving.timestamp() > resident.timestamp() => {
                    Step::Splice
                }
                (Some(_), Some(_)) => Step::Advance,
            };

            match step {
                Step::Done => return,
                Step::Append => {
                    *cursor = incoming;
                    return;
                }
                Step::Splice => {
                    if let Some(mut arriving) = incoming.take() {
                        incoming = arriving.next.take();
                        arriving.next = cursor.take();
                        *cursor = Some(arriving);
                    }
                }
                Step::Advance => {}
            }

            // After a splice the cursor moves onto the spliced commit's
            // link, which still holds the resident commit just compared.
            cursor = match cursor {
                Some(commit) => &mut commit.next,
                None => return,
            };
        }
    }
}

/// One move of the merge walk.
enum Step {
    /// Nothing left to merge.
    Done,
    /// Our chain ended; hang the rest of the incoming chain here.
    Append,
    /// Incoming head is strictly newer than the commit at the cursor.
    Splice,
    /// Commit at the cursor stays ahead of the incoming head.
    Advance,
}

impl Drop for CommitHistory {
    // Unlink iteratively so long chains don't recurse through Box drops.
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut commit) = link {
            link = commit.next.take();
        }
    }
}

/// Renders `"<name> - Current head: <commit>"` or `"<name> - No commits"`.
impl fmt::Display for CommitHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.head.as_deref() {
            Some(head) => write!(f, "{} - Current head: {}", self.name, head),
            None => write!(f, "{} - No commits", self.name),
        }
    }
}

/// Newest-first iterator over a history's commits.
pub struct Iter<'a> {
    next: Option<&'a Commit>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.older();
        Some(current)
    }
}

impl<'a> IntoIterator for &'a CommitHistory {
    type Item = &'a Commit;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
