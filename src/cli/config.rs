//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory holding the persisted zone layout
    #[arg(long, value_name = "DIR")]
    layout_dir: Option<PathBuf>,

    /// Pixel step between characters in the default layout
    #[arg(long, value_name = "PIXELS")]
    step: Option<f64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    paths: PathsOutput,
    keyboard: KeyboardOutput,
    log: LogOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    layout_dir: String,
}

#[derive(Serialize, Debug)]
struct KeyboardOutput {
    default_step: f64,
}

#[derive(Serialize, Debug)]
struct LogOutput {
    level: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let layout_dir = config
            .layout_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve layout directory: {e}")))?;

        if self.json {
            let output = ConfigOutput {
                paths: PathsOutput {
                    layout_dir: layout_dir.to_string_lossy().to_string(),
                },
                keyboard: KeyboardOutput {
                    default_step: config.keyboard.default_step,
                },
                log: LogOutput {
                    level: config.log.level.clone(),
                },
            };
            let json = serde_json::to_string_pretty(&output).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            println!("Fingerboard Configuration");
            println!("=========================");
            println!();
            println!("Paths:");
            println!("  Layout Directory: {}", layout_dir.display());
            println!();
            println!("Keyboard:");
            println!("  Default Step: {}", config.keyboard.default_step);
            println!();
            println!("Log:");
            println!("  Level: {}", config.log.level);
            println!();
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.layout_dir.is_none() && self.step.is_none() && self.log_level.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --layout-dir, --step, or --log-level",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(path) = &self.layout_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create layout directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.layout_dir = Some(path.clone());
        }

        if let Some(step) = self.step {
            config.keyboard.default_step = step;
        }

        if let Some(level) = &self.log_level {
            config.log.level.clone_from(level);
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}
