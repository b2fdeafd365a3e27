//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temporary data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `data_dir` as the data directory.
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_focuscoach"))
        .args(args)
        .env("FOCUSCOACH_DATA_DIR", data_dir)
        .env_remove("FOCUSCOACH_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let stdout = run_ok(data_dir, args);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_analyze_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_json(dir.path(), &["analyze", "--json"]);

    assert_eq!(out["analysis"]["riskScore"], 0.0);
    assert_eq!(out["analysis"]["interventionNeeded"], false);
    assert_eq!(out["analysis"]["recommendations"].as_array().unwrap().len(), 2);
    assert_eq!(out["riskLevel"], "low");
    assert_eq!(out["intervention"]["urgency"], "low");
}

#[test]
fn test_analyze_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_ok(dir.path(), &["analyze", "--mood", "overwhelmed"]);
    assert!(stdout.contains("Risk score: 0.80 (high)"));
    assert!(stdout.contains("Procrastination Alert!"));
}

#[test]
fn test_event_record_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_ok(
        dir.path(),
        &["event", "record", "--action", "task_postponed", "--mood", "ANXIOUS"],
    );
    assert!(stdout.contains("Event recorded:"));
    assert!(stdout.contains("Pattern scores updated"));

    let events = run_json(dir.path(), &["event", "list", "--json"]);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["action"], "TASK_POSTPONED");
    assert_eq!(events[0]["emotionalState"], "ANXIOUS");
    assert_eq!(events[0]["id"].as_str().unwrap().len(), 36);

    let patterns = run_json(dir.path(), &["patterns", "export"]);
    assert_eq!(patterns["task_postponement_frequency"], 0.1);
    assert_eq!(patterns["perfectionism_score"], 0.05);
}

#[test]
fn test_old_event_leaves_patterns_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_ok(
        dir.path(),
        &[
            "event",
            "record",
            "--action",
            "PROCRASTINATION_DETECTED",
            "--at",
            "2020-01-01T09:00:00Z",
        ],
    );
    assert!(stdout.contains("scores unchanged"));

    let patterns = run_json(dir.path(), &["patterns", "export"]);
    assert_eq!(patterns["deadline_pressure_tendency"], 0.0);
}

#[test]
fn test_event_record_rejects_unknown_action() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["event", "record", "--action", "napping"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown action"));
}

#[test]
fn test_task_record_and_analyze_by_id() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(
        dir.path(),
        &[
            "task",
            "record",
            "--id",
            "report",
            "--title",
            "Quarterly report",
            "--description",
            "Draft the quarterly report for finance",
            "--deadline",
            "2000-01-01T00:00:00Z",
            "--progress",
            "12.5",
        ],
    );

    let tasks = run_json(dir.path(), &["task", "list", "--json"]);
    assert_eq!(tasks[0]["id"], "report");
    assert_eq!(tasks[0]["progressPercent"], 12.5);

    // A past deadline with low progress still counts as imminent.
    let out = run_json(dir.path(), &["analyze", "--task", "report", "--json"]);
    let signals = out["analysis"]["signals"].as_array().unwrap();
    assert!(signals
        .iter()
        .any(|s| s["type"] == "temporal" && s["severity"] == "high"));
    assert_eq!(out["intervention"]["urgency"], "high");
}

#[test]
fn test_analyze_unknown_task_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["analyze", "--task", "missing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("missing"));
}

#[test]
fn test_patterns_import_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("patterns.json");
    std::fs::write(
        &file,
        r#"{"overwhelm_frequency": 0.5, "perfectionism_score": 2.0, "bogus": 1.0}"#,
    )
    .unwrap();

    let stdout = run_ok(dir.path(), &["patterns", "import", file.to_str().unwrap()]);
    assert!(stdout.contains("Imported 2 pattern scores"));
    assert!(stdout.contains("bogus"));

    let patterns = run_json(dir.path(), &["patterns", "export"]);
    assert_eq!(patterns["overwhelm_frequency"], 0.5);
    assert_eq!(patterns["perfectionism_score"], 1.0);
    assert!(patterns.get("bogus").is_none());

    run_ok(dir.path(), &["patterns", "reset"]);
    let patterns = run_json(dir.path(), &["patterns", "export"]);
    assert_eq!(patterns["overwhelm_frequency"], 0.0);
}

#[test]
fn test_config_get_set_reset() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(dir.path(), &["config", "get", "history.behavior_capacity"]).trim(), "100");

    run_ok(dir.path(), &["config", "set", "history.behavior_capacity", "2"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "history.behavior_capacity"]).trim(), "2");

    for _ in 0..3 {
        run_ok(dir.path(), &["event", "record", "--action", "TASK_STARTED"]);
    }
    let events = run_json(dir.path(), &["event", "list", "--json"]);
    assert_eq!(events.as_array().unwrap().len(), 2);

    run_ok(dir.path(), &["config", "reset"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "history.behavior_capacity"]).trim(), "100");
}

#[test]
fn test_config_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "analysis.intervention_threshold", "3"]);
    assert_eq!(code, 1);
    let (code, _, _) = run_cli(dir.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_ok(dir.path(), &["completions", "bash"]);
    assert!(stdout.contains("focuscoach"));
}
