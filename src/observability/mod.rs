//! Observability subsystem
//!
//! This module provides:
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Counters-only metrics
//!
//! Observability is read-only: nothing here changes how a history or a
//! session behaves.
//!
//! # Usage
//!
//! ```ignore
//! use minigit::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::CommitCreated, &[("repo", "main"), ("id", "4")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_commits_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
