//! End-to-end tests for `fingerboard simulate`.

use serde_json::json;

mod fixtures;
use fixtures::*;

fn simulate_json(config_dir: &std::path::Path, script: &std::path::Path, extra: &[&str]) -> serde_json::Value {
    let mut args = vec!["simulate", script.to_str().unwrap(), "--json"];
    args.extend_from_slice(extra);
    let output = isolated_command(&args, config_dir)
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "simulate should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("Should parse JSON output")
}

#[test]
fn test_simulate_calibrate_and_type() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let mut steps = calibration_script();
    steps.extend(drag_steps(1, "third", 0.0)); // j
    steps.extend(drag_steps(2, "second", 40.0)); // e
    steps.extend(drag_steps(3, "thumb", 0.0)); // space
    steps.extend(drag_steps(4, "fifth", -20.0)); // v
    let script = write_script(&temp_dir, "type.json", &steps);

    let result = simulate_json(temp_dir.path(), &script, &[]);
    assert_eq!(result["text"], "je v");
    assert_eq!(result["ready"], true);

    let events = result["events"].as_array().unwrap();
    let ready_events = events
        .iter()
        .filter(|event| event["event"] == "calibration_ready")
        .count();
    assert_eq!(ready_events, 1);
    assert!(events
        .iter()
        .any(|event| event["event"] == "character_selected"
            && event["selection"]["id"] == "e"
            && event["zone_id"] == "second"));
}

#[test]
fn test_simulate_backspace() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    let mut steps = calibration_script();
    steps.extend(drag_steps(1, "second", -40.0)); // a
    steps.extend(drag_steps(2, "second", -20.0)); // b
    steps.extend(drag_steps(3, "thumb", 20.0)); // backspace
    steps.extend(drag_steps(4, "thumb", -20.0)); // return
    let script = write_script(&temp_dir, "backspace.json", &steps);

    let result = simulate_json(temp_dir.path(), &script, &[]);
    assert_eq!(result["text"], "a\n");
}

#[test]
fn test_simulate_without_persist_leaves_layout_alone() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let script = write_script(&temp_dir, "calibrate.json", &calibration_script());

    let result = simulate_json(temp_dir.path(), &script, &[]);
    assert_eq!(result["ready"], true);
    assert!(!temp_dir.path().join("layouts").join("zones.json").exists());

    // A second run starts from scratch again
    let typing = write_script(&temp_dir, "typing.json", &drag_steps(1, "second", 0.0));
    let result = simulate_json(temp_dir.path(), &typing, &[]);
    assert_eq!(result["ready"], false);
    assert_eq!(result["text"], "");
}

#[test]
fn test_simulate_persist_keeps_calibration() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let script = write_script(&temp_dir, "calibrate.json", &calibration_script());

    let result = simulate_json(temp_dir.path(), &script, &["--persist"]);
    assert_eq!(result["ready"], true);
    assert!(temp_dir.path().join("layouts").join("zones.json").exists());

    let typing = write_script(&temp_dir, "typing.json", &drag_steps(1, "fourth", 20.0));
    let result = simulate_json(temp_dir.path(), &typing, &[]);
    assert_eq!(result["ready"], true);
    assert_eq!(result["text"], "r");
}

#[test]
fn test_simulate_reset_step() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let mut steps = calibration_script();
    steps.push(json!({"phase": "reset"}));
    steps.extend(drag_steps(1, "second", 0.0));
    let script = write_script(&temp_dir, "reset.json", &steps);

    let result = simulate_json(temp_dir.path(), &script, &[]);
    assert_eq!(result["ready"], false);
    assert_eq!(result["text"], "");
    let events = result["events"].as_array().unwrap();
    assert!(events.iter().any(|event| event["event"] == "calibration_reset"));
    assert_eq!(events.last().unwrap()["event"], "zone_committed");
}

#[test]
fn test_simulate_human_output() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let mut steps = calibration_script();
    steps.extend(drag_steps(1, "third", 20.0));
    let script = write_script(&temp_dir, "human.json", &steps);

    let output = isolated_command(&["simulate", script.to_str().unwrap()], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Text: \"k\""));
    assert!(stdout.contains("Ready: yes"));
}

#[test]
fn test_simulate_invalid_script() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let script = write_script(&temp_dir, "bad.json", &[json!({"phase": "hover"})]);

    let output = isolated_command(&["simulate", script.to_str().unwrap()], temp_dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid touch script"));

    let output = isolated_command(&["simulate", "/nonexistent/script.json"], temp_dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_verbose_overrides_rust_log() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let script = write_script(&temp_dir, "verbose.json", &drag_steps(1, "second", 0.0));

    let output = isolated_command(&["--verbose", "simulate", script.to_str().unwrap()], temp_dir.path())
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("script replayed"));

    let output = isolated_command(&["simulate", script.to_str().unwrap()], temp_dir.path())
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("script replayed"));
}
