//! End-to-end tests for `fingerboard config` commands.

mod fixtures;
use fixtures::*;

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output = isolated_command(&["config", "show"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Layout Directory"));
    assert!(stdout.contains("Default Step: 20"));
}

#[test]
fn test_config_show_json_schema() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output = isolated_command(&["config", "show", "--json"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    let layout_dir = result["paths"]["layout_dir"].as_str().unwrap();
    assert!(layout_dir.starts_with(temp_dir.path().to_str().unwrap()));
    assert!(layout_dir.ends_with("layouts"));
    assert_eq!(result["keyboard"]["default_step"], 20.0);
    assert_eq!(result["log"]["level"], "info");
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_values() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let layout_dir = temp_dir.path().join("my-layouts");

    let output = isolated_command(
        &[
            "config",
            "set",
            "--layout-dir",
            layout_dir.to_str().unwrap(),
            "--step",
            "32",
            "--log-level",
            "debug",
        ],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Set should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(layout_dir.is_dir(), "Layout directory should be created");
    assert!(temp_dir.path().join("config.toml").exists());

    let output = isolated_command(&["config", "show", "--json"], temp_dir.path())
        .output()
        .expect("Failed to execute command");
    let result: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();

    assert_eq!(
        result["paths"]["layout_dir"].as_str().unwrap(),
        layout_dir.to_str().unwrap()
    );
    assert_eq!(result["keyboard"]["default_step"], 32.0);
    assert_eq!(result["log"]["level"], "debug");
}

#[test]
fn test_config_set_requires_an_option() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output = isolated_command(&["config", "set"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("At least one configuration option"));
}

#[test]
fn test_config_set_rejects_non_positive_step() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output = isolated_command(&["config", "set", "--step", "0"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_invalid_config_file_is_reported() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    std::fs::write(
        temp_dir.path().join("config.toml"),
        "[keyboard]\ndefault_step = -5.0\n",
    )
    .unwrap();

    let output = isolated_command(&["config", "show"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("default_step"));
}
