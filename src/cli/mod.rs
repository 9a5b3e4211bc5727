//! CLI command handlers for Fingerboard.
//!
//! Headless, scriptable access to the stored layout, the configuration and
//! the keyboard controller for automation and testing.

pub mod common;
pub mod config;
pub mod layout;
pub mod simulate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use layout::LayoutArgs;
pub use simulate::{run_script, ScriptStep, SimulateArgs, SimulationReport};
