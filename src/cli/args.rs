//! CLI argument definitions using clap
//!
//! Commands:
//! - minigit serve [--config <path>]
//! - minigit replay <script> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// minigit - An in-memory commit history with chronological merge
#[derive(Parser, Debug)]
#[command(name = "minigit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read JSON requests from stdin, one per line, until EOF
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Apply the JSON requests in a file, one per line
    Replay {
        /// File of requests
        script: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_without_config() {
        let cli = Cli::try_parse_from(["minigit", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { config: None }));
    }

    #[test]
    fn test_parse_replay() {
        let cli =
            Cli::try_parse_from(["minigit", "replay", "session.jsonl", "--config", "c.json"])
                .unwrap();
        match cli.command {
            Command::Replay { script, config } => {
                assert_eq!(script, PathBuf::from("session.jsonl"));
                assert_eq!(config, Some(PathBuf::from("c.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_replay_requires_script() {
        assert!(Cli::try_parse_from(["minigit", "replay"]).is_err());
    }
}
