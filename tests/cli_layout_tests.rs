//! End-to-end tests for `fingerboard layout` commands.

use std::fs;

mod fixtures;
use fixtures::*;

fn layout_json(config_dir: &std::path::Path) -> serde_json::Value {
    let output = isolated_command(&["layout", "show", "--json"], config_dir)
        .output()
        .expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "layout show should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("Should parse JSON output")
}

#[test]
fn test_layout_show_defaults() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let result = layout_json(temp_dir.path());

    assert_eq!(result["ready"], false);
    let zones = result["zones"].as_array().unwrap();
    assert_eq!(zones.len(), 5);
    assert_eq!(zones[1]["id"], "second");
    assert_eq!(zones[1]["charSet"].as_array().unwrap().len(), 7);
    assert_eq!(zones[1]["charSet"][2]["initial"], true);
}

#[test]
fn test_layout_show_human_readable() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output = isolated_command(&["layout", "show"], temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("calibration pending"));
    assert!(stdout.contains("a b [c] d e f g"));
    assert!(stdout.contains("(not calibrated)"));
}

#[test]
fn test_layout_export_import_round_trip() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let export_path = temp_dir.path().join("exported.json");

    let output = isolated_command(
        &["layout", "export", export_path.to_str().unwrap()],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    // Mark every zone as placed and import it back
    let mut zones: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    for zone in zones.as_array_mut().unwrap() {
        zone["isPositioned"] = serde_json::Value::Bool(true);
        zone["angle"] = serde_json::json!(-30.0);
    }
    let import_path = temp_dir.path().join("import.json");
    fs::write(&import_path, serde_json::to_string(&zones).unwrap()).unwrap();

    let output = isolated_command(
        &["layout", "import", import_path.to_str().unwrap()],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "import should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(temp_dir.path().join("layouts").join("zones.json").exists());

    let result = layout_json(temp_dir.path());
    assert_eq!(result["ready"], true);
    assert_eq!(result["zones"][3]["angle"], -30.0);
}

#[test]
fn test_layout_import_accepts_string_char_sets() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let import_path = temp_dir.path().join("short.json");
    fs::write(
        &import_path,
        r#"[{"id": "left", "step": 25, "charSet": "qwert"}, {"id": "right", "step": 25, "charSet": "yuiop"}]"#,
    )
    .unwrap();

    let output = isolated_command(
        &["layout", "import", import_path.to_str().unwrap()],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let result = layout_json(temp_dir.path());
    let zones = result["zones"].as_array().unwrap();
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0]["charSet"][2]["id"], "e");
    assert_eq!(zones[0]["charSet"][2]["initial"], true);
}

#[test]
fn test_layout_import_rejects_invalid_layout() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let import_path = temp_dir.path().join("bad.json");
    fs::write(&import_path, r#"[{"id": "x", "step": 20, "charSet": []}]"#).unwrap();

    let output = isolated_command(
        &["layout", "import", import_path.to_str().unwrap()],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid layout file"));
    assert!(!temp_dir.path().join("layouts").join("zones.json").exists());
}

#[test]
fn test_layout_import_missing_file() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let output = isolated_command(
        &["layout", "import", "/nonexistent/layout.json"],
        temp_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(2),
        "Nonexistent file should exit with code 2 (I/O error)"
    );
}

#[test]
fn test_layout_reset_clears_positions() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let layouts = temp_dir.path().join("layouts");
    fs::create_dir_all(&layouts).unwrap();
    fs::write(
        layouts.join("zones.json"),
        r#"[{"id": "solo", "step": 20, "angle": 45, "top": 10, "left": 10, "isPositioned": true, "charSet": "abc"}]"#,
    )
    .unwrap();
    assert_eq!(layout_json(temp_dir.path())["ready"], true);

    let output = isolated_command(&["layout", "reset"], temp_dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let result = layout_json(temp_dir.path());
    assert_eq!(result["ready"], false);
    assert_eq!(result["zones"][0]["isPositioned"], false);
    assert_eq!(result["zones"][0]["id"], "solo");
}
