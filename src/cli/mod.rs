//! CLI module for minigit
//!
//! Provides command-line interface for:
//! - serve: apply JSON requests from stdin
//! - replay: apply JSON requests from a file

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{replay, run, run_command, run_session, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
