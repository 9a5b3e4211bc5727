//! Ordered character sets with a single-selection invariant.

use serde::{Deserialize, Serialize};

use crate::constants::STRING_SET_INITIAL_INDEX;
use crate::error::{KeyboardError, KeyboardResult};

/// One selectable character or action within a zone.
///
/// `value` is the text emitted when the entry is committed; it is `None` for
/// no-op keys such as backspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterEntry {
    /// Unique identifier within the owning set (e.g., "a", "space", "backspace")
    pub id: String,
    /// Display label
    pub title: String,
    /// Emitted text, if any
    pub value: Option<String>,
    initial: bool,
    selected: bool,
}

impl CharacterEntry {
    /// Creates a non-initial entry.
    pub fn new(id: impl Into<String>, title: impl Into<String>, value: Option<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            value,
            initial: false,
            selected: false,
        }
    }

    /// Creates an entry whose id, title and value are all `ch`.
    pub fn from_char(ch: char) -> Self {
        let text = ch.to_string();
        Self::new(text.clone(), text.clone(), Some(text))
    }

    /// Marks this entry as the set's initial entry.
    #[must_use]
    pub const fn as_initial(mut self) -> Self {
        self.initial = true;
        self
    }

    /// Whether this is the set's initial (reset) entry.
    pub const fn is_initial(&self) -> bool {
        self.initial
    }

    /// Whether this entry is currently selected.
    pub const fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Durable form of a [`CharacterEntry`] (no `selected` flag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Entry identifier
    pub id: String,
    /// Display label
    pub title: String,
    /// Emitted text (`null` for no-op keys)
    pub value: Option<String>,
    /// Initial flag
    #[serde(default)]
    pub initial: bool,
}

/// Stored character set: either explicit records or a plain string that is
/// expanded one entry per character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharSetRecord {
    /// Shorthand string form, e.g. `"abcdefg"`
    Chars(String),
    /// Explicit entry list
    Entries(Vec<CharacterRecord>),
}

/// Ordered set of character entries.
///
/// # Invariants
///
/// - Entry ids are unique and order is significant (it is the layout along the
///   drag axis).
/// - Exactly one entry is `initial`; it is fixed at construction.
/// - At most one entry is `selected`. The set, not the entry, enforces this:
///   entries are only ever selected through [`CharacterSet::select`] and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    entries: Vec<CharacterEntry>,
    selected: Option<usize>,
}

impl CharacterSet {
    /// Builds a set from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::Configuration`] if the list is empty, contains
    /// duplicate ids, or does not have exactly one initial entry.
    pub fn new(mut entries: Vec<CharacterEntry>) -> KeyboardResult<Self> {
        if entries.is_empty() {
            return Err(KeyboardError::configuration(
                "character set must contain at least one entry",
            ));
        }

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|other| other.id == entry.id) {
                return Err(KeyboardError::configuration(format!(
                    "duplicate character id '{}'",
                    entry.id
                )));
            }
        }

        let initial_count = entries.iter().filter(|e| e.initial).count();
        if initial_count != 1 {
            return Err(KeyboardError::configuration(format!(
                "character set must have exactly one initial entry (found {initial_count})"
            )));
        }

        for entry in &mut entries {
            entry.selected = false;
        }

        Ok(Self {
            entries,
            selected: None,
        })
    }

    /// Expands a plain string into one entry per character.
    ///
    /// Titles and values equal the character and the entry at index 2 is the
    /// initial entry, so strings shorter than three characters are rejected.
    pub fn from_chars(chars: &str) -> KeyboardResult<Self> {
        let entries = chars
            .chars()
            .enumerate()
            .map(|(index, ch)| {
                let entry = CharacterEntry::from_char(ch);
                if index == STRING_SET_INITIAL_INDEX {
                    entry.as_initial()
                } else {
                    entry
                }
            })
            .collect();

        Self::new(entries)
    }

    /// Builds a set from its stored form.
    pub fn from_record(record: CharSetRecord) -> KeyboardResult<Self> {
        match record {
            CharSetRecord::Chars(chars) => Self::from_chars(&chars),
            CharSetRecord::Entries(records) => Self::new(
                records
                    .into_iter()
                    .map(|r| CharacterEntry {
                        id: r.id,
                        title: r.title,
                        value: r.value,
                        initial: r.initial,
                        selected: false,
                    })
                    .collect(),
            ),
        }
    }

    /// Durable form of the set; selection is session state and is dropped.
    pub fn to_records(&self) -> Vec<CharacterRecord> {
        self.entries
            .iter()
            .map(|e| CharacterRecord {
                id: e.id.clone(),
                title: e.title.clone(),
                value: e.value.clone(),
                initial: e.initial,
            })
            .collect()
    }

    /// Entries in layout order.
    pub fn entries(&self) -> &[CharacterEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the entry with `entry_id`.
    pub fn index_of(&self, entry_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == entry_id)
    }

    /// Entry at ordinal position `index`.
    pub fn entry_at(&self, index: usize) -> KeyboardResult<&CharacterEntry> {
        self.entries
            .get(index)
            .ok_or(KeyboardError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// The entry flagged `initial`.
    pub fn initial_entry(&self) -> KeyboardResult<&CharacterEntry> {
        self.entries
            .iter()
            .find(|e| e.initial)
            .ok_or_else(|| KeyboardError::configuration("character set has no initial entry"))
    }

    /// Position of the initial entry.
    pub fn initial_index(&self) -> KeyboardResult<usize> {
        self.entries
            .iter()
            .position(|e| e.initial)
            .ok_or_else(|| KeyboardError::configuration("character set has no initial entry"))
    }

    /// Currently selected entry, if any.
    pub fn selected(&self) -> Option<&CharacterEntry> {
        self.selected.map(|i| &self.entries[i])
    }

    /// Position of the currently selected entry, if any.
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selects the entry with `entry_id`, deselecting any previous selection.
    pub fn select(&mut self, entry_id: &str) -> KeyboardResult<&CharacterEntry> {
        let index = self.index_of(entry_id).ok_or_else(|| {
            KeyboardError::configuration(format!("unknown character id '{entry_id}'"))
        })?;
        self.select_at(index)
    }

    /// Selects the entry at `index`, deselecting any previous selection.
    pub fn select_at(&mut self, index: usize) -> KeyboardResult<&CharacterEntry> {
        if index >= self.entries.len() {
            return Err(KeyboardError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        if let Some(previous) = self.selected.take() {
            self.entries[previous].selected = false;
        }
        self.entries[index].selected = true;
        self.selected = Some(index);

        Ok(&self.entries[index])
    }

    /// Selects the initial entry.
    pub fn reset_to_initial(&mut self) -> KeyboardResult<&CharacterEntry> {
        let index = self.initial_index()?;
        self.select_at(index)
    }

    /// Number of entries flagged `selected`.
    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }
}
