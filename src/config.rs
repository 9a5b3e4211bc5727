//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{APP_NAME, CONFIG_DIR_ENV, DEFAULT_STEP};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding the persisted zone layout (defaults to `<config_dir>/layouts`)
    #[serde(default)]
    pub layout_dir: Option<PathBuf>,
}

/// Keyboard defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardConfig {
    /// Pixel step used when building the compiled-in layout
    #[serde(default = "default_step")]
    pub default_step: f64,
}

/// Default step between entries (20px)
const fn default_step() -> f64 {
    DEFAULT_STEP
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            default_step: default_step(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "fingerboard=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Fingerboard/config.toml`
/// - macOS: `~/Library/Application Support/Fingerboard/config.toml`
/// - Windows: `%APPDATA%\Fingerboard\config.toml`
///
/// Setting `FINGERBOARD_CONFIG_DIR` replaces the platform directory.
///
/// # Validation
///
/// - `default_step` must be finite and greater than zero
/// - `level` must not be empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Keyboard defaults
    #[serde(default)]
    pub keyboard: KeyboardConfig,
    /// Logging
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// - `$FINGERBOARD_CONFIG_DIR` when set and non-empty
    /// - Linux: `~/.config/Fingerboard/`
    /// - macOS: `~/Library/Application Support/Fingerboard/`
    /// - Windows: `%APPDATA%\Fingerboard\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory holding the persisted layout.
    pub fn layout_dir(&self) -> Result<PathBuf> {
        match &self.paths.layout_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("layouts")),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate().context(format!(
            "Invalid config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file.
    ///
    /// The file is written to a temp path and renamed into place.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let step = self.keyboard.default_step;
        if !step.is_finite() || step <= 0.0 {
            anyhow::bail!("keyboard.default_step must be greater than zero, got {step}");
        }

        if self.log.level.trim().is_empty() {
            anyhow::bail!("log.level must not be empty");
        }

        Ok(())
    }
}
