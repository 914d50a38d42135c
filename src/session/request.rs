//! Session requests
//!
//! One JSON object per request, tagged by `op`:
//!
//! ```json
//! {"op":"create","repo":"main"}
//! {"op":"commit","repo":"main","message":"Initial commit."}
//! {"op":"history","repo":"main","n":5}
//! {"op":"synchronize","repo":"main","other":"feature"}
//! ```

use serde::Deserialize;

/// A parsed session request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Create an empty repository
    Create { repo: String },
    /// Record a commit
    Commit { repo: String, message: String },
    /// Id of the newest commit
    Head { repo: String },
    /// Whether an id is present
    Contains { repo: String, id: String },
    /// Number of commits
    Size { repo: String },
    /// Rendered history of the `n` newest commits
    History {
        repo: String,
        #[serde(default)]
        n: Option<i64>,
    },
    /// Structured records of the `n` newest commits
    Log {
        repo: String,
        #[serde(default)]
        n: Option<i64>,
    },
    /// Remove a commit by id
    Drop { repo: String, id: String },
    /// Move every commit of `other` into `repo`
    Synchronize { repo: String, other: String },
    /// One-line summary of a repository
    Show { repo: String },
    /// All repositories with their sizes
    List,
    /// Metrics snapshot
    Stats,
}

impl Request {
    /// Parse a single request line
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// The `op` tag, for logging
    pub fn op(&self) -> &'static str {
        match self {
            Request::Create { .. } => "create",
            Request::Commit { .. } => "commit",
            Request::Head { .. } => "head",
            Request::Contains { .. } => "contains",
            Request::Size { .. } => "size",
            Request::History { .. } => "history",
            Request::Log { .. } => "log",
            Request::Drop { .. } => "drop",
            Request::Synchronize { .. } => "synchronize",
            Request::Show { .. } => "show",
            Request::List => "list",
            Request::Stats => "stats",
        }
    }
}
