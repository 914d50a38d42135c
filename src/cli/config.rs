//! Configuration file
//!
//! JSON, every field optional:
//!
//! ```json
//! { "log_level": "info", "history_depth": 10, "max_repositories": 64 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::session::SessionSettings;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Commits shown by history/log when the request omits `n` (default 10)
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    /// Maximum repositories per session (default 64)
    #[serde(default = "default_max_repositories")]
    pub max_repositories: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_history_depth() -> usize {
    10
}
fn default_max_repositories() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            history_depth: default_history_depth(),
            max_repositories: default_max_repositories(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Load from `path` when given, else defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        if self.history_depth == 0 {
            return Err(CliError::config_error("history_depth must be > 0"));
        }

        if self.max_repositories == 0 {
            return Err(CliError::config_error("max_repositories must be > 0"));
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Session limits derived from this configuration
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            history_depth: self.history_depth,
            max_repositories: self.max_repositories,
        }
    }
}
