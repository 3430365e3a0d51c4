//! Integration tests for the `planner` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the generate and
//! expand subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, configuration layering and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the week.json fixture.
fn week_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/week.json")
}

/// Helper: path to the late_start.toml fixture (10:00 opening, hourly slots).
fn late_start_toml_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/late_start.toml")
}

fn backwards_event_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/backwards_event.json")
}

fn week_json() -> String {
    std::fs::read_to_string(week_json_path()).expect("week.json fixture must exist")
}

/// Helper: run `planner` with `args` and parse stdout as JSON.
fn run_json(args: &[&str]) -> Value {
    let output = Command::cargo_bin("planner")
        .unwrap()
        .args(args)
        .output()
        .expect("planner should run");
    assert!(output.status.success(), "planner failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

/// Helper: start time of the placed task `id` in a generate result.
fn task_start(result: &Value, id: &str) -> Option<String> {
    result["items"]
        .as_array()?
        .iter()
        .find(|i| i["kind"] == "task" && i["source_id"] == id)
        .map(|i| i["start"].as_str().unwrap().to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Generate subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn generate_stdin_to_stdout() {
    Command::cargo_bin("planner")
        .unwrap()
        .arg("generate")
        .write_stdin(week_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source_id\": \"t1\""))
        .stdout(predicate::str::contains("2026-03-16T09:30:00"));
}

#[test]
fn generate_places_events_tasks_and_reports_unplaced() {
    let result = run_json(&["generate", "-i", week_json_path()]);

    let items = result["items"].as_array().unwrap();
    // Standup, the report, and Wednesday's team sync.
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["name"], "Standup");
    assert_eq!(items[1]["name"], "Write report");
    assert_eq!(items[1]["end"], "2026-03-16T10:30:00");
    assert_eq!(items[2]["name"], "Team sync");
    assert_eq!(items[2]["start"], "2026-03-18T14:00:00");

    // The completed task is gone; the overdue one is reported.
    let unplaced = result["unplaced"].as_array().unwrap();
    assert_eq!(unplaced.len(), 1);
    assert_eq!(unplaced[0]["id"], "t3");
}

#[test]
fn generate_text_format() {
    Command::cargo_bin("planner")
        .unwrap()
        .args(["generate", "-i", week_json_path(), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday 2026-03-16"))
        .stdout(predicate::str::contains("09:30-10:30  task   Write report"))
        .stdout(predicate::str::contains("Wednesday 2026-03-18"))
        .stdout(predicate::str::contains("Unplaced (1):"))
        .stdout(predicate::str::contains("t3  Expense claim"));
}

#[test]
fn now_flag_overrides_document() {
    // A day later the report's deadline has passed too.
    let result = run_json(&["generate", "-i", week_json_path(), "--now", "2026-03-17T08:00:00"]);

    assert_eq!(result["unplaced"].as_array().unwrap().len(), 2);
    assert!(task_start(&result, "t1").is_none());
}

#[test]
fn now_flag_accepts_rfc3339() {
    let result = run_json(&["generate", "-i", week_json_path(), "--now", "2026-03-16T08:00:00+02:00"]);

    assert_eq!(task_start(&result, "t1").as_deref(), Some("2026-03-16T09:30:00"));
}

#[test]
fn repeated_runs_produce_identical_output() {
    let run = || {
        Command::cargo_bin("planner")
            .unwrap()
            .args(["generate", "-i", week_json_path()])
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn generate_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("timeline.json");

    Command::cargo_bin("planner")
        .unwrap()
        .args(["generate", "-i", week_json_path(), "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&out).expect("output file must exist");
    let result: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(result["items"].as_array().unwrap().len(), 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration layering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn config_file_changes_the_window() {
    let result = run_json(&["generate", "-i", week_json_path(), "--config", late_start_toml_path()]);

    assert_eq!(task_start(&result, "t1").as_deref(), Some("2026-03-16T10:00:00"));
}

#[test]
fn flags_override_config_file() {
    let result = run_json(&[
        "generate",
        "-i",
        week_json_path(),
        "--config",
        late_start_toml_path(),
        "--work-start",
        "13",
    ]);

    assert_eq!(task_start(&result, "t1").as_deref(), Some("2026-03-16T13:00:00"));
}

#[test]
fn inverted_window_is_rejected() {
    Command::cargo_bin("planner")
        .unwrap()
        .args(["generate", "-i", week_json_path(), "--work-start", "18", "--work-end", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid generator configuration"));
}

#[test]
fn zero_granularity_is_rejected() {
    Command::cargo_bin("planner")
        .unwrap()
        .args(["generate", "-i", week_json_path(), "--granularity", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("granularity"));
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "recurrence_horizon_days = 0\n").unwrap();

    Command::cargo_bin("planner")
        .unwrap()
        .args(["generate", "-i", week_json_path(), "--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Expand subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expand_lists_occurrences_over_horizon() {
    let result = run_json(&["expand", "-i", week_json_path(), "--horizon", "14"]);

    let occurrences = result.as_array().unwrap();
    // Standup once; team sync on the 18th and 25th.
    assert_eq!(occurrences.len(), 3);
    let sync_starts: Vec<&str> = occurrences
        .iter()
        .filter(|o| o["event_id"] == "e2")
        .map(|o| o["start"].as_str().unwrap())
        .collect();
    assert_eq!(sync_starts, vec!["2026-03-18T14:00:00", "2026-03-25T14:00:00"]);
}

#[test]
fn oversized_horizon_is_rejected() {
    Command::cargo_bin("planner")
        .unwrap()
        .args(["expand", "-i", week_json_path(), "--horizon", "4294967295"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("recurrence horizon"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn backwards_event_fails_generation() {
    Command::cargo_bin("planner")
        .unwrap()
        .args(["generate", "-i", backwards_event_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid event"));
}

#[test]
fn backwards_event_fails_expansion() {
    Command::cargo_bin("planner")
        .unwrap()
        .args(["expand", "-i", backwards_event_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid event"));
}

#[test]
fn malformed_json_fails() {
    Command::cargo_bin("planner")
        .unwrap()
        .arg("generate")
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse input JSON"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("planner")
        .unwrap()
        .args(["generate", "-i", "/nonexistent/planner/week.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn verbose_flag_logs_placements_to_stderr() {
    Command::cargo_bin("planner")
        .unwrap()
        .env_remove("RUST_LOG")
        .args(["-v", "generate", "-i", week_json_path()])
        .assert()
        .success()
        .stderr(predicate::str::contains("task placed"));
}

#[test]
fn no_subcommand_shows_usage() {
    Command::cargo_bin("planner")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
