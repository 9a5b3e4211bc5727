//! Shared test fixtures for keyboard and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use fingerboard::app::KeyboardApp;
use fingerboard::constants::DEFAULT_STEP;
use fingerboard::models::{CharacterEntry, CharacterSet, Zone, ZoneCollection};
use fingerboard::services::geometry::Point;
use fingerboard::services::{LayoutStore, MemoryStorage};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Path to the fingerboard binary
pub fn fingerboard_bin() -> String {
    std::env::var("CARGO_BIN_EXE_fingerboard")
        .unwrap_or_else(|_| "target/debug/fingerboard".to_string())
}

/// Creates a Command with an isolated config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(fingerboard_bin());
    cmd.env("FINGERBOARD_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// A keyboard booted from empty in-memory storage (default layout, calibrating).
pub fn fresh_app() -> KeyboardApp<MemoryStorage> {
    KeyboardApp::boot(LayoutStore::new(MemoryStorage::new()), DEFAULT_STEP)
        .expect("default layout should boot")
}

/// Screen anchor used when calibrating zone `index` in tests.
pub fn anchor_for(index: usize) -> Point {
    Point::new(60.0 * index as f64 + 20.0, 400.0)
}

/// Calibrates every zone with a straight-down drag (angle 0).
pub fn calibrate_vertical(app: &mut KeyboardApp<MemoryStorage>) {
    for index in 0..app.zones().len() {
        let start = anchor_for(index);
        app.touch_start(100, start, None);
        app.touch_move(100, Point::new(start.x, start.y + 120.0));
        app.touch_end(100, 0);
    }
}

/// A keyboard that is already calibrated and ready for typing.
pub fn ready_app() -> KeyboardApp<MemoryStorage> {
    let mut app = fresh_app();
    calibrate_vertical(&mut app);
    assert!(app.is_ready(), "calibration should complete");
    app
}

/// A two-zone layout with explicit entries, used for custom-set tests.
pub fn two_zone_layout() -> ZoneCollection {
    let punctuation = CharacterSet::new(vec![
        CharacterEntry::new("comma", ",", Some(",".to_string())),
        CharacterEntry::new("period", ".", Some(".".to_string())).as_initial(),
        CharacterEntry::new("backspace", "←", None),
    ])
    .expect("valid punctuation set");
    let letters = CharacterSet::from_chars("abcde").expect("valid letter set");

    ZoneCollection::new(vec![
        Zone::new("punct", 30.0, punctuation).expect("valid zone"),
        Zone::new("letters", 30.0, letters).expect("valid zone"),
    ])
    .expect("valid collection")
}

/// Touch script that calibrates all five default zones vertically.
pub fn calibration_script() -> Vec<Value> {
    let mut steps = Vec::new();
    for index in 0..5 {
        let x = 60.0 * index as f64 + 20.0;
        steps.push(json!({"phase": "start", "touch": 100, "x": x, "y": 400.0}));
        steps.push(json!({"phase": "move", "touch": 100, "x": x, "y": 520.0}));
        steps.push(json!({"phase": "end", "touch": 100, "active": 0}));
    }
    steps
}

/// Touch steps that drag `zone` by `dy` pixels and lift.
pub fn drag_steps(touch: u64, zone: &str, dy: f64) -> Vec<Value> {
    vec![
        json!({"phase": "start", "touch": touch, "x": 0.0, "y": 200.0, "zone": zone}),
        json!({"phase": "move", "touch": touch, "x": 0.0, "y": 200.0 + dy}),
        json!({"phase": "end", "touch": touch, "active": 0}),
    ]
}

/// Writes a script to a file in `dir` and returns its path.
pub fn write_script(dir: &TempDir, name: &str, steps: &[Value]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(steps).expect("serializable script"))
        .expect("Failed to write script");
    path
}
