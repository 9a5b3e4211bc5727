//! Zone ("finger") model: one rotated drag region bound to a character set.

use serde::{Deserialize, Serialize};

use crate::error::{KeyboardError, KeyboardResult};
use crate::models::character_set::{CharSetRecord, CharacterEntry, CharacterSet};
use crate::services::geometry::Point;

/// A single drag zone of the keyboard.
///
/// # Invariants
///
/// - `step` is finite and strictly positive.
/// - `current_char` always mirrors the title of the set's selected entry.
/// - `is_positioned` is false for new or reset zones and only becomes true
///   through [`Zone::place`], which the calibration workflow calls on commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Zone identifier (e.g., "thumb", "second")
    pub id: String,
    /// Pixel spacing between adjacent characters along the local axis
    pub step: f64,
    /// Clockwise rotation of the local frame in degrees
    pub angle: f64,
    /// Screen-space anchor (y)
    pub top: f64,
    /// Screen-space anchor (x)
    pub left: f64,
    is_positioned: bool,
    current_char: String,
    char_set: CharacterSet,
}

/// Durable form of a [`Zone`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    /// Zone identifier
    pub id: String,
    /// Character spacing in pixels
    pub step: f64,
    /// Rotation in degrees
    #[serde(default)]
    pub angle: f64,
    /// Screen-space anchor (y)
    #[serde(default)]
    pub top: f64,
    /// Screen-space anchor (x)
    #[serde(default)]
    pub left: f64,
    /// Whether calibration has placed this zone
    #[serde(default)]
    pub is_positioned: bool,
    /// Character set
    pub char_set: CharSetRecord,
}

impl Zone {
    /// Creates an unpositioned zone with its initial entry selected.
    pub fn new(id: impl Into<String>, step: f64, char_set: CharacterSet) -> KeyboardResult<Self> {
        let id = id.into();
        Self::validate_step(&id, step)?;

        let mut zone = Self {
            id,
            step,
            angle: 0.0,
            top: 0.0,
            left: 0.0,
            is_positioned: false,
            current_char: String::new(),
            char_set,
        };
        zone.reset_selection()?;
        Ok(zone)
    }

    fn validate_step(id: &str, step: f64) -> KeyboardResult<()> {
        if !step.is_finite() || step <= 0.0 {
            return Err(KeyboardError::configuration(format!(
                "zone '{id}' has invalid step {step}; must be a positive number"
            )));
        }
        Ok(())
    }

    /// Restores a zone from its stored form.
    pub fn from_record(record: ZoneRecord) -> KeyboardResult<Self> {
        let char_set = CharacterSet::from_record(record.char_set).map_err(|e| {
            KeyboardError::configuration(format!("zone '{}': {e}", record.id))
        })?;

        let mut zone = Self::new(record.id, record.step, char_set)?;
        zone.angle = record.angle;
        zone.top = record.top;
        zone.left = record.left;
        zone.is_positioned = record.is_positioned;
        Ok(zone)
    }

    /// Stored form of the zone (selection stripped).
    pub fn to_record(&self) -> ZoneRecord {
        ZoneRecord {
            id: self.id.clone(),
            step: self.step,
            angle: self.angle,
            top: self.top,
            left: self.left,
            is_positioned: self.is_positioned,
            char_set: CharSetRecord::Entries(self.char_set.to_records()),
        }
    }

    /// Whether calibration has committed this zone's placement.
    pub const fn is_positioned(&self) -> bool {
        self.is_positioned
    }

    /// Title of the currently selected entry.
    pub fn current_char(&self) -> &str {
        &self.current_char
    }

    /// The zone's character set.
    pub const fn char_set(&self) -> &CharacterSet {
        &self.char_set
    }

    /// Anchor point in screen space.
    pub const fn anchor(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Commits a calibrated placement.
    pub(crate) fn place(&mut self, angle: f64, anchor: Point) {
        self.angle = angle;
        self.top = anchor.y;
        self.left = anchor.x;
        self.is_positioned = true;
    }

    /// Marks the zone as needing calibration again. Geometry is kept until the
    /// next commit overwrites it.
    pub fn clear_position(&mut self) {
        self.is_positioned = false;
    }

    /// Selects the entry at `index` and refreshes `current_char`.
    pub fn select_at(&mut self, index: usize) -> KeyboardResult<&CharacterEntry> {
        let title = self.char_set.select_at(index)?.title.clone();
        self.current_char = title;
        self.char_set.entry_at(index)
    }

    /// Selects the entry with `entry_id` and refreshes `current_char`.
    pub fn select(&mut self, entry_id: &str) -> KeyboardResult<&CharacterEntry> {
        let index = self.char_set.index_of(entry_id).ok_or_else(|| {
            KeyboardError::configuration(format!(
                "zone '{}' has no character '{entry_id}'",
                self.id
            ))
        })?;
        self.select_at(index)
    }

    /// Re-selects the initial entry.
    pub fn reset_selection(&mut self) -> KeyboardResult<()> {
        let index = self.char_set.initial_index()?;
        self.select_at(index)?;
        Ok(())
    }

    /// Currently selected entry.
    pub fn selected(&self) -> Option<&CharacterEntry> {
        self.char_set.selected()
    }
}
