//! Integration tests for the `tt` binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tt() -> Command {
    let mut cmd = Command::cargo_bin("tt").expect("Failed to find tt binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("Failed to run tt");
    assert!(output.status.success(), "tt failed: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("Output should be JSON")
}

fn names(events: &serde_json::Value, event: &str, field: &str) -> Vec<String> {
    events
        .as_array()
        .expect("Expected a JSON array")
        .iter()
        .filter(|e| e["event"] == event)
        .map(|e| match field {
            "name" => e["participant"]["name"].as_str().unwrap_or_default().to_string(),
            _ => e[field].as_str().unwrap_or_default().to_string(),
        })
        .collect()
}

// =============================================================================
// Turns
// =============================================================================

#[test]
fn test_turns_alice_and_bob() {
    let events = json_output(tt().args(["--format", "json", "turns", "-p", "Alice:2", "-p", "Bob:0", "-n", "5"]));

    assert_eq!(names(&events, "served", "name"), ["Alice", "Bob", "Alice", "Bob", "Bob"]);
    assert_eq!(events[2]["retired"], true);
    assert_eq!(events[4]["participant"]["budget"], "unlimited");
}

#[test]
fn test_turns_drain_until_empty() {
    let events = json_output(tt().args(["-f", "json", "turns", "-p", "Bob:2", "-p", "Tim:5", "-p", "Sue:3"]));

    let served = names(&events, "served", "name");
    assert_eq!(served.len(), 10);
    assert_eq!(served.last().map(String::as_str), Some("Tim"));
}

#[test]
fn test_turns_drain_stops_at_max_rounds() {
    let events = json_output(tt().args(["-f", "json", "turns", "-p", "Forever", "--max-rounds", "7"]));

    assert_eq!(names(&events, "served", "name").len(), 7);
}

#[test]
fn test_turns_past_end_reports_error() {
    tt().args(["turns", "-p", "Once:1", "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Once (0)"))
        .stdout(predicate::str::contains("No one in the queue."));
}

#[test]
fn test_turns_rejects_bad_budget() {
    tt().args(["turns", "-p", "Alice:lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid turn count"));
}

// =============================================================================
// Priority
// =============================================================================

#[test]
fn test_priority_order() {
    for backend in ["heap", "scan"] {
        let events = json_output(tt().args([
            "-f", "json", "priority", "-i", "A:1", "-i", "B:3", "-i", "C:2", "--backend", backend,
        ]));
        assert_eq!(names(&events, "popped", "value"), ["B", "C", "A"], "{backend}");
    }
}

#[test]
fn test_priority_named_levels_and_ties() {
    let events = json_output(tt().args([
        "-f", "json", "priority", "-i", "X:high", "-i", "Y:3", "-i", "Z:low", "-i", "W",
    ]));

    assert_eq!(names(&events, "popped", "value"), ["X", "Y", "W", "Z"]);
}

#[test]
fn test_priority_text_output() {
    tt().args(["priority", "-i", "first:5", "-i", "second:5"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)first.*second").unwrap());
}

// =============================================================================
// Scenarios and config
// =============================================================================

#[test]
fn test_run_scenario() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("scenario.yml");
    fs::write(
        &path,
        r#"
steps:
  - push: { value: X, priority: 5 }
  - push: { value: Y, priority: 5 }
  - push: { value: Z, priority: 1 }
  - pop: 4
"#,
    )
    .unwrap();

    let events = json_output(tt().args(["-f", "json", "run"]).arg(&path));

    assert_eq!(names(&events, "popped", "value"), ["X", "Y", "Z"]);
    let last = events.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["event"], "error");
    assert_eq!(last["message"], "The queue is empty.");
}

#[test]
fn test_run_missing_scenario_fails() {
    tt().args(["run", "/nonexistent/scenario.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scenario"));
}

#[test]
fn test_config_default_turns() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = temp_dir.path().join("turnstile.yml");
    fs::write(&config, "scheduler:\n  default-turns: 1\n").unwrap();

    let events = json_output(
        tt().arg("--config")
            .arg(&config)
            .args(["-f", "json", "turns", "-p", "a", "-p", "b"]),
    );

    assert_eq!(names(&events, "served", "name"), ["a", "b"]);
}

#[test]
fn test_config_log_file_with_verbose() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("logs").join("tt.log");
    let config = temp_dir.path().join("turnstile.yml");
    fs::write(&config, format!("log-file: {}\n", log_path.display())).unwrap();

    tt().arg("--verbose")
        .arg("-c")
        .arg(&config)
        .args(["turns", "-p", "A:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A (0)"))
        .stderr(predicate::str::contains("serve_next").not());

    let log = fs::read_to_string(&log_path).expect("Log file should exist");
    assert!(log.contains("TurnScheduler::serve_next"), "log was: {log}");
    assert!(log.contains("DEBUG"), "log was: {log}");
}

#[test]
fn test_without_verbose_debug_is_not_logged() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("tt.log");
    let config = temp_dir.path().join("turnstile.yml");
    fs::write(&config, format!("log-file: {}\n", log_path.display())).unwrap();

    tt().arg("-c").arg(&config).args(["turns", "-p", "A:1"]).assert().success();

    let log = fs::read_to_string(&log_path).expect("Log file should exist");
    assert!(!log.contains("TurnScheduler::serve_next"), "log was: {log}");
}

#[test]
fn test_project_local_config_is_found() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join(".turnstile.yml"), "scheduler:\n  default-turns: 1\n").unwrap();

    let events = json_output(tt().current_dir(temp_dir.path()).args(["-f", "json", "turns", "-p", "a", "-p", "b"]));

    assert_eq!(names(&events, "served", "name"), ["a", "b"]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_user_config_dir_is_found() {
    let work_dir = TempDir::new().expect("Failed to create temp dir");
    let config_home = TempDir::new().expect("Failed to create temp dir");
    let user_config = config_home.path().join("turnstile");
    fs::create_dir_all(&user_config).unwrap();
    fs::write(user_config.join("turnstile.yml"), "priority:\n  default-priority: critical\n").unwrap();

    let events = json_output(
        tt().current_dir(work_dir.path())
            .env("XDG_CONFIG_HOME", config_home.path())
            .args(["-f", "json", "priority", "-i", "explicit:3", "-i", "defaulted"]),
    );

    // Items without a priority pick up critical (4) from the user config
    assert_eq!(names(&events, "popped", "value"), ["defaulted", "explicit"]);
}
