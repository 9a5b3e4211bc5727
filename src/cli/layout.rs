//! Layout management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::models::{ZoneCollection, ZoneRecord};
use crate::services::layout_store::{read_layout_file, write_layout_file};
use crate::services::{FileStorage, LayoutStore};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Layout management commands
#[derive(Args, Debug)]
pub struct LayoutArgs {
    #[command(subcommand)]
    command: LayoutCommand,
}

#[derive(Subcommand, Debug)]
enum LayoutCommand {
    /// Display the persisted zone layout
    Show(LayoutShowArgs),
    /// Clear every zone position so calibration starts over
    Reset,
    /// Write the persisted layout to a file
    Export(LayoutFileArgs),
    /// Replace the persisted layout with a layout file
    Import(LayoutFileArgs),
}

/// Display the persisted zone layout
#[derive(Args, Debug)]
pub struct LayoutShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Layout file argument
#[derive(Args, Debug)]
pub struct LayoutFileArgs {
    /// Path to a layout JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

/// JSON-serializable layout for output
#[derive(Serialize, Debug)]
struct LayoutOutput {
    ready: bool,
    zones: Vec<ZoneRecord>,
}

impl LayoutArgs {
    /// Execute layout subcommand
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        match &self.command {
            LayoutCommand::Show(args) => args.execute(&config),
            LayoutCommand::Reset => reset(&config),
            LayoutCommand::Export(args) => args.export(&config),
            LayoutCommand::Import(args) => args.import(&config),
        }
    }
}

impl LayoutShowArgs {
    fn execute(&self, config: &Config) -> CliResult<()> {
        let zones = open_store(config)?
            .load_or_default(config.keyboard.default_step)
            .map_err(|e| CliError::validation(format!("Failed to build default layout: {e}")))?;

        if self.json {
            let output = LayoutOutput {
                ready: zones.all_positioned(),
                zones: zones.to_records(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize layout to JSON: {e}")))?;
            println!("{json}");
        } else {
            output_human_readable(&zones);
        }

        Ok(())
    }
}

impl LayoutFileArgs {
    fn export(&self, config: &Config) -> CliResult<()> {
        let zones = open_store(config)?
            .load_or_default(config.keyboard.default_step)
            .map_err(|e| CliError::validation(format!("Failed to build default layout: {e}")))?;

        write_layout_file(&zones, &self.file)
            .map_err(|e| CliError::io(format!("Failed to export layout: {e:#}")))?;

        println!("Exported layout to: {}", self.file.display());
        Ok(())
    }

    fn import(&self, config: &Config) -> CliResult<()> {
        if !self.file.exists() {
            return Err(CliError::io(format!(
                "Layout file not found: {}",
                self.file.display()
            )));
        }

        let zones = read_layout_file(&self.file)
            .map_err(|e| CliError::validation(format!("Invalid layout file: {e:#}")))?;

        open_store(config)?
            .save(&zones)
            .map_err(|e| CliError::io(format!("Failed to save layout: {e}")))?;

        println!(
            "Imported {} zones from: {}",
            zones.len(),
            self.file.display()
        );
        Ok(())
    }
}

fn reset(config: &Config) -> CliResult<()> {
    let mut store = open_store(config)?;
    let mut zones = store
        .load_or_default(config.keyboard.default_step)
        .map_err(|e| CliError::validation(format!("Failed to build default layout: {e}")))?;

    zones.clear_positions();
    store
        .save(&zones)
        .map_err(|e| CliError::io(format!("Failed to save layout: {e}")))?;

    println!("Calibration cleared; the next drags will place zones from the first one.");
    Ok(())
}

/// Loads the configuration, rejecting an invalid config file.
pub(crate) fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Opens the file-backed layout store configured in `config`.
pub(crate) fn open_store(config: &Config) -> CliResult<LayoutStore<FileStorage>> {
    let dir = config
        .layout_dir()
        .map_err(|e| CliError::io(format!("Failed to resolve layout directory: {e:#}")))?;
    Ok(LayoutStore::new(FileStorage::new(dir)))
}

/// Output layout in human-readable format
fn output_human_readable(zones: &ZoneCollection) {
    let status = if zones.all_positioned() {
        "ready"
    } else {
        "calibration pending"
    };
    println!("Zone Layout ({status})");
    println!("====================");
    println!();

    for zone in zones {
        println!("{}:", zone.id);
        if zone.is_positioned() {
            println!(
                "  Position: left {:.1}, top {:.1}, angle {:.1}°",
                zone.left, zone.top, zone.angle
            );
        } else {
            println!("  Position: (not calibrated)");
        }
        println!("  Step: {}", zone.step);

        let characters: Vec<String> = zone
            .char_set()
            .entries()
            .iter()
            .map(|entry| {
                if entry.is_initial() {
                    format!("[{}]", entry.title)
                } else {
                    entry.title.clone()
                }
            })
            .collect();
        println!("  Characters: {}", characters.join(" "));
        println!();
    }
}
