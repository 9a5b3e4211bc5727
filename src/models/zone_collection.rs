//! Ordered collection of zones and its serialization.

use crate::error::{KeyboardError, KeyboardResult};
use crate::models::zone::{Zone, ZoneRecord};

/// Ordered set of zones making up a keyboard.
///
/// The canonical layout has five zones but any non-empty collection with
/// unique zone ids is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCollection {
    zones: Vec<Zone>,
}

impl ZoneCollection {
    /// Creates a collection, validating it is non-empty with unique ids.
    pub fn new(zones: Vec<Zone>) -> KeyboardResult<Self> {
        if zones.is_empty() {
            return Err(KeyboardError::configuration(
                "zone collection must contain at least one zone",
            ));
        }

        for (i, zone) in zones.iter().enumerate() {
            if zones[..i].iter().any(|other| other.id == zone.id) {
                return Err(KeyboardError::configuration(format!(
                    "duplicate zone id '{}'",
                    zone.id
                )));
            }
        }

        Ok(Self { zones })
    }

    /// Restores a collection from stored records.
    pub fn from_records(records: Vec<ZoneRecord>) -> KeyboardResult<Self> {
        let zones = records
            .into_iter()
            .map(Zone::from_record)
            .collect::<KeyboardResult<Vec<_>>>()?;
        Self::new(zones)
    }

    /// Stored form: one record per zone, selection flags stripped.
    pub fn to_records(&self) -> Vec<ZoneRecord> {
        self.zones.iter().map(Zone::to_record).collect()
    }

    /// Parses the persisted JSON array.
    pub fn from_json(json: &str) -> KeyboardResult<Self> {
        let records: Vec<ZoneRecord> = serde_json::from_str(json)
            .map_err(|e| KeyboardError::persistence(format!("invalid layout JSON: {e}")))?;
        Self::from_records(records)
            .map_err(|e| KeyboardError::persistence(format!("invalid layout: {e}")))
    }

    /// Serializes to the persisted JSON array.
    pub fn to_json(&self) -> KeyboardResult<String> {
        serde_json::to_string_pretty(&self.to_records())
            .map_err(|e| KeyboardError::persistence(format!("failed to serialize layout: {e}")))
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Always false for a constructed collection.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zone at `index`.
    pub fn get(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// Mutable zone at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Zone> {
        self.zones.get_mut(index)
    }

    /// Position of the zone with `zone_id`.
    pub fn index_of(&self, zone_id: &str) -> Option<usize> {
        self.zones.iter().position(|z| z.id == zone_id)
    }

    /// Iterates zones in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    /// Whether every zone has been placed by calibration.
    pub fn all_positioned(&self) -> bool {
        self.zones.iter().all(Zone::is_positioned)
    }

    /// First zone at or after `from` that still needs calibration.
    pub fn next_unpositioned(&self, from: usize) -> Option<usize> {
        self.zones
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, z)| !z.is_positioned())
            .map(|(i, _)| i)
    }

    /// Clears `is_positioned` on every zone.
    pub fn clear_positions(&mut self) {
        for zone in &mut self.zones {
            zone.clear_position();
        }
    }
}

impl<'a> IntoIterator for &'a ZoneCollection {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
