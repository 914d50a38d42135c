//! Session Protocol Tests
//!
//! End-to-end request/response behavior:
//! - One JSON response per request line
//! - Error responses carry stable codes and never end the session
//! - Replay scripts drive the same loop as stdin

use std::fs::File;
use std::io::{BufReader, Write};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use minigit::cli::{run_session, Config};
use minigit::history::{CommitIdAllocator, HistoryContext, ManualClock};
use minigit::session::{Session, SessionSettings};
use serde_json::Value;

// =============================================================================
// Helper Functions
// =============================================================================

fn deterministic_session(settings: SessionSettings) -> (Session, Arc<ManualClock>) {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let ctx = HistoryContext::new(Arc::new(CommitIdAllocator::new()), clock.clone());
    (Session::with_context(settings, ctx), clock)
}

fn run(session: &mut Session, script: &str) -> Vec<Value> {
    let mut out = Vec::new();
    run_session(session, script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// =============================================================================
// Request Flow Tests
// =============================================================================

/// Commit, inspect and drop through the protocol.
#[test]
fn test_commit_head_history_drop() {
    let (mut session, _) = deterministic_session(SessionSettings::default());
    let script = r#"
{"op":"create","repo":"main"}
{"op":"commit","repo":"main","message":"Initial commit."}
{"op":"commit","repo":"main","message":"Added unit tests."}
{"op":"head","repo":"main"}
{"op":"history","repo":"main","n":1}
{"op":"drop","repo":"main","id":"1"}
{"op":"head","repo":"main"}
{"op":"contains","repo":"main","id":"1"}
"#;
    let out = run(&mut session, script);

    assert_eq!(out.len(), 8);
    assert!(out.iter().all(|r| r["status"] == "ok"));
    assert_eq!(out[1]["data"]["id"], "0");
    assert_eq!(out[3]["data"]["head"], "1");
    assert_eq!(
        out[4]["data"]["history"],
        "1 at 2024-03-01 00:00:00.000 UTC: Added unit tests.\n"
    );
    assert_eq!(out[5]["data"]["dropped"], true);
    assert_eq!(out[6]["data"]["head"], "0");
    assert_eq!(out[7]["data"]["contains"], false);
}

/// Omitted `n` falls back to the configured depth.
#[test]
fn test_history_uses_configured_depth() {
    let config = Config::parse(r#"{"history_depth":2}"#).unwrap();
    let (mut session, _) = deterministic_session(config.session_settings());

    let mut script = String::from("{\"op\":\"create\",\"repo\":\"r\"}\n");
    for i in 0..5 {
        script.push_str(&format!("{{\"op\":\"commit\",\"repo\":\"r\",\"message\":\"c{}\"}}\n", i));
    }
    script.push_str("{\"op\":\"log\",\"repo\":\"r\"}\n");

    let out = run(&mut session, &script);
    let commits = out[6]["data"]["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0]["message"], "c4");
    assert_eq!(commits[1]["id"], "3");
}

/// Synchronize merges by timestamp and empties the source.
#[test]
fn test_synchronize_through_protocol() {
    let (mut session, clock) = deterministic_session(SessionSettings::default());
    run(
        &mut session,
        "{\"op\":\"create\",\"repo\":\"a\"}\n{\"op\":\"create\",\"repo\":\"b\"}\n",
    );

    for (repo, message) in [("a", "a1"), ("b", "b1"), ("a", "a2"), ("b", "b2")] {
        clock.advance(1);
        let line = format!(
            "{{\"op\":\"commit\",\"repo\":\"{}\",\"message\":\"{}\"}}\n",
            repo, message
        );
        run(&mut session, &line);
    }

    let out = run(
        &mut session,
        "{\"op\":\"synchronize\",\"repo\":\"a\",\"other\":\"b\"}\n\
         {\"op\":\"log\",\"repo\":\"a\"}\n\
         {\"op\":\"size\",\"repo\":\"b\"}\n\
         {\"op\":\"show\",\"repo\":\"a\"}\n",
    );

    assert_eq!(out[0]["data"]["size"], 4);
    assert_eq!(out[0]["data"]["received"], 2);
    let messages: Vec<&str> = out[1]["data"]["commits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["b2", "a2", "b1", "a1"]);
    assert_eq!(out[2]["data"]["size"], 0);
    assert!(out[3]["data"]["summary"]
        .as_str()
        .unwrap()
        .starts_with("a - Current head: 3 at "));
}

// =============================================================================
// Error Tests
// =============================================================================

/// Failed requests answer with codes and the session carries on.
#[test]
fn test_errors_are_responses() {
    let (mut session, _) = deterministic_session(SessionSettings::default());
    let script = r#"
{"op":"create","repo":""}
{"op":"create","repo":"a"}
{"op":"create","repo":"a"}
{"op":"history","repo":"a","n":-1}
{"op":"synchronize","repo":"a","other":"a"}
{"op":"commit","repo":"missing","message":"x"}
{"op":"teleport"}
{"op":"stats"}
"#;
    let out = run(&mut session, script);

    let codes: Vec<&str> = out[..7]
        .iter()
        .map(|r| r["code"].as_str().unwrap_or("ok"))
        .collect();
    assert_eq!(
        codes,
        vec![
            "MINIGIT_INVALID_ARGUMENT",
            "ok",
            "MINIGIT_REPOSITORY_EXISTS",
            "MINIGIT_INVALID_ARGUMENT",
            "MINIGIT_SELF_SYNCHRONIZE",
            "MINIGIT_UNKNOWN_REPOSITORY",
            "MINIGIT_MALFORMED_REQUEST",
        ]
    );
    assert_eq!(out[7]["data"]["requests_rejected"], 6);
    assert_eq!(out[7]["data"]["histories_created"], 1);
}

// =============================================================================
// Replay Tests
// =============================================================================

/// A replay file drives the same loop as stdin.
#[test]
fn test_replay_file() {
    let mut script = tempfile::NamedTempFile::new().unwrap();
    writeln!(script, r#"{{"op":"create","repo":"r"}}"#).unwrap();
    writeln!(script, r#"{{"op":"commit","repo":"r","message":"from file"}}"#).unwrap();
    writeln!(script, r#"{{"op":"size","repo":"r"}}"#).unwrap();

    let (mut session, _) = deterministic_session(SessionSettings::default());
    let reader = BufReader::new(File::open(script.path()).unwrap());
    let mut out = Vec::new();
    run_session(&mut session, reader, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let last: Value = serde_json::from_str(text.lines().last().unwrap()).unwrap();
    assert_eq!(last["data"]["size"], 1);
}
