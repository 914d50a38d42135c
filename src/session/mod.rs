//! Multi-repository session
//!
//! A session keeps named histories in a registry and applies JSON
//! requests to them, one at a time. Every request yields either a `data`
//! value or a `SessionError`; a failed request never ends the session.
//!
//! All histories in a session share one `HistoryContext`, so commit ids
//! are unique across the whole session.

mod errors;
mod request;

pub use errors::{SessionError, SessionResult};
pub use request::Request;

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::history::{
    Commit, CommitHistory, CommitId, CommitRecord, HistoryContext, HistoryError,
};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

/// Limits and defaults a session runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Number of commits `history`/`log` return when `n` is omitted
    pub history_depth: usize,
    /// Upper bound on repositories in the registry
    pub max_repositories: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            history_depth: 10,
            max_repositories: 64,
        }
    }
}

/// A registry of named histories driven by requests
#[derive(Debug)]
pub struct Session {
    repos: BTreeMap<String, CommitHistory>,
    context: HistoryContext,
    settings: SessionSettings,
    metrics: MetricsRegistry,
}

impl Session {
    /// Create a session using the process-wide id allocator and system clock
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_context(settings, HistoryContext::default())
    }

    /// Create a session whose histories stamp commits from `context`
    pub fn with_context(settings: SessionSettings, context: HistoryContext) -> Self {
        Self {
            repos: BTreeMap::new(),
            context,
            settings,
            metrics: MetricsRegistry::new(),
        }
    }

    /// Session counters
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Look up a repository by name
    pub fn repository(&self, name: &str) -> Option<&CommitHistory> {
        self.repos.get(name)
    }

    /// Parse and apply one request line
    pub fn handle_line(&mut self, line: &str) -> SessionResult<Value> {
        match Request::parse(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                let err = SessionError::from(e);
                self.reject(&err);
                Err(err)
            }
        }
    }

    /// Apply one request
    pub fn handle(&mut self, request: Request) -> SessionResult<Value> {
        let result = self.dispatch(request);
        if let Err(e) = &result {
            self.reject(e);
        }
        result
    }

    fn dispatch(&mut self, request: Request) -> SessionResult<Value> {
        match request {
            Request::Create { repo } => self.create(repo),
            Request::Commit { repo, message } => {
                let id = self.repo_mut(&repo)?.commit(message);
                self.metrics.increment_commits_created();
                log_event_with_fields(
                    Event::CommitCreated,
                    &[("repo", repo.as_str()), ("id", id.to_string().as_str())],
                );
                Ok(json!({ "id": id.to_string() }))
            }
            Request::Head { repo } => {
                let head = self.repo(&repo)?.head().map(|id| id.to_string());
                Ok(json!({ "head": head }))
            }
            Request::Contains { repo, id } => {
                let history = self.repo(&repo)?;
                let found = parse_id(&id).is_some_and(|id| history.contains(id));
                Ok(json!({ "contains": found }))
            }
            Request::Size { repo } => Ok(json!({ "size": self.repo(&repo)?.size() })),
            Request::History { repo, n } => {
                let n = self.depth(n)?;
                let rendered = self.repo(&repo)?.history(n)?;
                Ok(json!({ "history": rendered }))
            }
            Request::Log { repo, n } => {
                let n = self.depth(n)?;
                let commits: Vec<CommitRecord> =
                    self.repo(&repo)?.iter().take(n).map(Commit::record).collect();
                Ok(json!({ "commits": commits }))
            }
            Request::Drop { repo, id } => {
                let history = self.repo_mut(&repo)?;
                let dropped = parse_id(&id).is_some_and(|id| history.drop(id));
                self.metrics.record_drop(dropped);
                let event = if dropped {
                    Event::CommitDropped
                } else {
                    Event::DropMissed
                };
                log_event_with_fields(
                    event,
                    &[("repo", repo.as_str()), ("id", id.as_str())],
                );
                Ok(json!({ "dropped": dropped }))
            }
            Request::Synchronize { repo, other } => self.synchronize(repo, other),
            Request::Show { repo } => Ok(json!({ "summary": self.repo(&repo)?.to_string() })),
            Request::List => {
                let repos: Vec<Value> = self
                    .repos
                    .iter()
                    .map(|(name, history)| json!({ "name": name, "size": history.size() }))
                    .collect();
                Ok(json!({ "repos": repos }))
            }
            Request::Stats => Ok(json!(self.metrics.snapshot())),
        }
    }

    fn create(&mut self, repo: String) -> SessionResult<Value> {
        if self.repos.contains_key(&repo) {
            return Err(SessionError::RepositoryExists(repo));
        }
        if self.repos.len() >= self.settings.max_repositories {
            return Err(SessionError::RepositoryLimit(self.settings.max_repositories));
        }

        let history = CommitHistory::with_context(repo.clone(), self.context.clone())?;
        self.repos.insert(repo.clone(), history);
        self.metrics.increment_histories_created();
        log_event_with_fields(Event::RepositoryCreated, &[("repo", repo.as_str())]);

        Ok(json!({ "repo": repo }))
    }

    fn synchronize(&mut self, repo: String, other: String) -> SessionResult<Value> {
        if repo == other {
            return Err(SessionError::SelfSynchronize(repo));
        }

        // The source leaves the registry for the duration of the merge so
        // both histories can be borrowed mutably; it always goes back in.
        let mut source = self
            .repos
            .remove(&other)
            .ok_or_else(|| SessionError::UnknownRepository(other.clone()))?;
        let received = source.size();

        log_event_with_fields(
            Event::SyncBegin,
            &[("repo", repo.as_str()), ("other", other.as_str())],
        );
        let merged = match self.repos.get_mut(&repo) {
            Some(target) => {
                target.synchronize(&mut source);
                Ok(target.size())
            }
            None => Err(SessionError::UnknownRepository(repo.clone())),
        };
        self.repos.insert(other.clone(), source);
        let size = merged?;

        self.metrics.record_synchronization(received as u64);
        log_event_with_fields(
            Event::SyncComplete,
            &[
                ("repo", repo.as_str()),
                ("other", other.as_str()),
                ("received", received.to_string().as_str()),
                ("size", size.to_string().as_str()),
            ],
        );

        Ok(json!({ "size": size, "received": received }))
    }

    fn repo(&self, name: &str) -> SessionResult<&CommitHistory> {
        self.repos
            .get(name)
            .ok_or_else(|| SessionError::UnknownRepository(name.to_string()))
    }

    fn repo_mut(&mut self, name: &str) -> SessionResult<&mut CommitHistory> {
        self.repos
            .get_mut(name)
            .ok_or_else(|| SessionError::UnknownRepository(name.to_string()))
    }

    /// Resolve a requested history length; absent means the configured depth.
    fn depth(&self, n: Option<i64>) -> SessionResult<usize> {
        match n {
            None => Ok(self.settings.history_depth),
            Some(n) if n > 0 => Ok(usize::try_from(n).unwrap_or(usize::MAX)),
            Some(n) => Err(HistoryError::invalid_argument(format!(
                "history length must be positive, got {}",
                n
            ))
            .into()),
        }
    }

    fn reject(&self, err: &SessionError) {
        self.metrics.increment_requests_rejected();
        log_event_with_fields(
            Event::RequestRejected,
            &[("code", err.code()), ("message", err.to_string().as_str())],
        );
    }
}

/// Ids that don't parse can't name a commit.
fn parse_id(raw: &str) -> Option<CommitId> {
    raw.parse().ok()
}
