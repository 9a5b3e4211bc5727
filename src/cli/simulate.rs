//! Touch script replay.
//!
//! Feeds a recorded sequence of touch events through [`KeyboardApp`] and
//! reports the text a consumer of the selection events would have composed.

use crate::app::{KeyboardApp, KeyboardEvent};
use crate::cli::common::{CliError, CliResult};
use crate::cli::layout::{load_config, open_store};
use crate::constants::LAYOUT_STORAGE_KEY;
use crate::input::TouchId;
use crate::services::geometry::Point;
use crate::services::{LayoutStorage, LayoutStore, MemoryStorage, TextComposer};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Replay a JSON touch script against the keyboard
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Path to the touch script (JSON array of steps)
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Output text and events as JSON
    #[arg(long)]
    json: bool,

    /// Write calibration changes back to the persisted layout
    #[arg(long)]
    persist: bool,
}

/// One step of a touch script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ScriptStep {
    /// A touch goes down, optionally inside a zone
    Start {
        /// Platform touch id
        touch: TouchId,
        /// Screen x
        x: f64,
        /// Screen y
        y: f64,
        /// Zone under the touch
        #[serde(default)]
        zone: Option<String>,
    },
    /// A touch moves
    Move {
        /// Platform touch id
        touch: TouchId,
        /// Screen x
        x: f64,
        /// Screen y
        y: f64,
    },
    /// A touch lifts
    End {
        /// Platform touch id
        touch: TouchId,
        /// Touches still down afterwards
        #[serde(default)]
        active: usize,
    },
    /// Calibration restarts
    Reset,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Composed text
    pub text: String,
    /// Whether the keyboard ended ready for typing
    pub ready: bool,
    /// Every event emitted, in order
    pub events: Vec<KeyboardEvent>,
}

impl SimulateArgs {
    /// Execute simulate command
    pub fn execute(&self) -> CliResult<()> {
        let steps = read_script(&self.script)?;
        let config = load_config()?;
        let store = open_store(&config)?;
        let step = config.keyboard.default_step;

        let report = if self.persist {
            let mut app = KeyboardApp::boot(store, step)
                .map_err(|e| CliError::validation(format!("Failed to start keyboard: {e}")))?;
            run_script(&mut app, &steps)
        } else {
            // Work on a copy so the persisted layout is left alone
            let zones = store
                .load_or_default(step)
                .map_err(|e| CliError::validation(format!("Failed to build default layout: {e}")))?;
            let json = zones
                .to_json()
                .map_err(|e| CliError::validation(format!("Failed to copy layout: {e}")))?;
            let memory = LayoutStore::new(MemoryStorage::with_entry(LAYOUT_STORAGE_KEY, json));
            let mut app = KeyboardApp::boot(memory, step)
                .map_err(|e| CliError::validation(format!("Failed to start keyboard: {e}")))?;
            run_script(&mut app, &steps)
        };

        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::io(format!("Failed to serialize report to JSON: {e}")))?;
            println!("{json}");
        } else {
            println!("Text: {:?}", report.text);
            println!("Ready: {}", if report.ready { "yes" } else { "no" });
            println!("Events: {}", report.events.len());
        }

        Ok(())
    }
}

/// Reads and parses a touch script.
pub fn read_script(path: &Path) -> CliResult<Vec<ScriptStep>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::io(format!("Failed to read script {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        CliError::validation(format!("Invalid touch script {}: {e}", path.display()))
    })
}

/// Replays `steps` through `app`, composing text from the selections.
pub fn run_script<S: LayoutStorage>(app: &mut KeyboardApp<S>, steps: &[ScriptStep]) -> SimulationReport {
    let mut composer = TextComposer::new();
    let mut events = Vec::new();

    for step in steps {
        let emitted = match step {
            ScriptStep::Start { touch, x, y, zone } => {
                app.touch_start(*touch, Point::new(*x, *y), zone.as_deref())
            }
            ScriptStep::Move { touch, x, y } => app.touch_move(*touch, Point::new(*x, *y)),
            ScriptStep::End { touch, active } => app.touch_end(*touch, *active),
            ScriptStep::Reset => app.reset(),
        };

        for event in &emitted {
            if let Some(selection) = event.selection() {
                composer.apply(selection);
            }
        }
        events.extend(emitted);
    }

    debug!(steps = steps.len(), events = events.len(), "script replayed");
    SimulationReport {
        text: composer.text().to_string(),
        ready: app.is_ready(),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_step_parsing() {
        let steps: Vec<ScriptStep> = serde_json::from_str(
            r#"[
                {"phase": "start", "touch": 1, "x": 0, "y": 100, "zone": "second"},
                {"phase": "move", "touch": 1, "x": 0, "y": 180},
                {"phase": "end", "touch": 1},
                {"phase": "reset"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            steps[0],
            ScriptStep::Start {
                touch: 1,
                x: 0.0,
                y: 100.0,
                zone: Some("second".to_string())
            }
        );
        assert_eq!(steps[2], ScriptStep::End { touch: 1, active: 0 });
        assert_eq!(steps[3], ScriptStep::Reset);
    }

    #[test]
    fn test_unknown_phase_is_rejected() {
        let result: Result<Vec<ScriptStep>, _> =
            serde_json::from_str(r#"[{"phase": "hover", "touch": 1}]"#);
        assert!(result.is_err());
    }
}
