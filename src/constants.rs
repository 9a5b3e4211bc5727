//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and layout defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Fingerboard";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "FINGERBOARD_CONFIG_DIR";

/// Storage key under which the zone layout is persisted.
pub const LAYOUT_STORAGE_KEY: &str = "zones";

/// Pixel spacing between adjacent characters in the compiled-in layout.
pub const DEFAULT_STEP: f64 = 20.0;

/// Index of the initial entry when a character set is expanded from a string.
pub const STRING_SET_INITIAL_INDEX: usize = 2;

/// Entry id the text composer treats as "delete last character".
pub const BACKSPACE_ID: &str = "backspace";
