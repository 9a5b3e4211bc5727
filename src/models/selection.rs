//! Committed-selection event emitted when a zone drag ends.

use serde::{Deserialize, Serialize};

use crate::constants::BACKSPACE_ID;
use crate::models::character_set::CharacterEntry;

/// Payload of a zone's "character selected" event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEvent {
    /// Committed entry id
    pub id: String,
    /// Committed entry title
    pub title: String,
    /// Committed entry value (`None` for no-op keys)
    pub value: Option<String>,
}

impl SelectionEvent {
    /// Whether this selection deletes rather than inserts.
    pub fn is_backspace(&self) -> bool {
        self.id == BACKSPACE_ID
    }
}

impl From<&CharacterEntry> for SelectionEvent {
    fn from(entry: &CharacterEntry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            value: entry.value.clone(),
        }
    }
}
