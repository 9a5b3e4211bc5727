//! Zone layout persistence.
//!
//! The storage medium is a plain key/value abstraction ([`LayoutStorage`]);
//! [`LayoutStore`] is the adapter that serializes a [`ZoneCollection`] into it.
//! Loading fails soft: anything missing or malformed yields `None` and the
//! caller substitutes the compiled-in layout.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::LAYOUT_STORAGE_KEY;
use crate::error::{KeyboardError, KeyboardResult};
use crate::models::{default_layout, ZoneCollection};

/// Key/value storage medium for serialized layouts.
pub trait LayoutStorage {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`, if any.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Directory-backed storage: each key maps to `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path used for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl LayoutStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
        Ok(Some(content))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create layout directory: {}", self.dir.display())
        })?;
        write_atomic(&self.path_for(key), value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove layout file: {}", path.display()))?;
        }
        Ok(())
    }
}

/// In-process storage, used by tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with one key.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }

    /// Raw stored value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl LayoutStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Persistence adapter for the zone layout.
#[derive(Debug, Clone)]
pub struct LayoutStore<S> {
    storage: S,
    key: String,
}

impl<S: LayoutStorage> LayoutStore<S> {
    /// Creates a store using the default layout key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, LAYOUT_STORAGE_KEY)
    }

    /// Creates a store using a custom key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Loads the saved layout.
    ///
    /// Returns `None` if nothing is stored or the stored layout cannot be read
    /// or parsed; failures are logged, never raised.
    pub fn load(&self) -> Option<ZoneCollection> {
        let json = match self.storage.read(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                debug!(key = %self.key, "no stored layout");
                return None;
            }
            Err(e) => {
                let error = format!("{e:#}");
                warn!(key = %self.key, %error, "failed to read stored layout");
                return None;
            }
        };

        match ZoneCollection::from_json(&json) {
            Ok(zones) => {
                debug!(key = %self.key, zones = zones.len(), "loaded stored layout");
                Some(zones)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored layout is invalid, ignoring it");
                None
            }
        }
    }

    /// Loads the saved layout or builds the compiled-in default.
    pub fn load_or_default(&self, default_step: f64) -> KeyboardResult<ZoneCollection> {
        match self.load() {
            Some(zones) => Ok(zones),
            None => default_layout(default_step),
        }
    }

    /// Saves the layout; `selected` flags are never written.
    pub fn save(&mut self, zones: &ZoneCollection) -> KeyboardResult<()> {
        let json = zones.to_json()?;
        self.storage
            .write(&self.key, &json)
            .map_err(|e| KeyboardError::persistence(format!("{e:#}")))?;
        debug!(key = %self.key, zones = zones.len(), "saved layout");
        Ok(())
    }

    /// Removes the saved layout.
    pub fn clear(&mut self) -> KeyboardResult<()> {
        self.storage
            .remove(&self.key)
            .map_err(|e| KeyboardError::persistence(format!("{e:#}")))
    }

    /// Underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning the storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Reads a layout file in the persisted format.
pub fn read_layout_file(path: &Path) -> Result<ZoneCollection> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
    ZoneCollection::from_json(&content)
        .with_context(|| format!("Failed to parse layout file: {}", path.display()))
}

/// Writes a layout file in the persisted format.
pub fn write_layout_file(zones: &ZoneCollection, path: &Path) -> Result<()> {
    let json = zones.to_json().context("Failed to serialize layout")?;
    write_atomic(path, &json)
}

/// Writes `content` to `path` via a temp file and rename so the target is
/// never left half-written.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename temp file {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}
