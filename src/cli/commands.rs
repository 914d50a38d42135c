//! CLI command implementations
//!
//! Both commands boot the same way:
//! 1. Load configuration (or defaults)
//! 2. Apply the log level
//! 3. Create a session
//! 4. Feed it request lines, writing one response per line
//!
//! A failed request produces an error response and the loop continues.
//! Only an I/O failure on input or output ends a command early.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::session::Session;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config } => serve(config.as_deref()),
        Command::Replay { script, config } => replay(&script, config.as_deref()),
    }
}

/// Serve requests from stdin until EOF
pub fn serve(config_path: Option<&Path>) -> CliResult<()> {
    let mut session = boot(config_path)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut session, stdin.lock(), &mut stdout.lock())
}

/// Apply every request in `script`
pub fn replay(script: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let mut session = boot(config_path)?;
    let file = File::open(script).map_err(|e| {
        CliError::io_error(format!("Failed to open script {}: {}", script.display(), e))
    })?;
    let stdout = io::stdout();
    run_session(&mut session, BufReader::new(file), &mut stdout.lock())
}

fn boot(config_path: Option<&Path>) -> CliResult<Session> {
    let config = Config::load_or_default(config_path)?;
    Logger::set_min_severity(config.severity()?);

    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(Event::ConfigLoaded, &[("source", source.as_str())]);

    Ok(Session::new(config.session_settings()))
}

/// Drive `session` with request lines from `input`, responding on `output`
///
/// Blank lines are skipped.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> CliResult<()> {
    log_event(Event::SessionStart);

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match session.handle_line(&line) {
            Ok(data) => write_response(output, data)?,
            Err(e) => write_error(output, e.code(), &e.to_string())?,
        }
    }

    log_event(Event::SessionEnd);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionSettings;
    use serde_json::Value;

    fn responses(input: &str) -> Vec<Value> {
        let mut session = Session::new(SessionSettings::default());
        let mut out = Vec::new();
        run_session(&mut session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_one_response_per_request() {
        let out = responses(
            "{\"op\":\"create\",\"repo\":\"cmd-a\"}\n\n{\"op\":\"size\",\"repo\":\"cmd-a\"}\n",
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[1]["data"]["size"], 0);
    }

    #[test]
    fn test_errors_do_not_stop_session() {
        let out = responses(
            "garbage\n{\"op\":\"size\",\"repo\":\"nope\"}\n{\"op\":\"create\",\"repo\":\"cmd-b\"}\n",
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[0]["code"], "MINIGIT_MALFORMED_REQUEST");
        assert_eq!(out[1]["code"], "MINIGIT_UNKNOWN_REPOSITORY");
        assert_eq!(out[2]["status"], "ok");
    }

    #[test]
    fn test_replay_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let err = replay(&dir.path().join("absent.jsonl"), None).unwrap_err();
        assert!(err.message().contains("Failed to open script"));
    }
}
