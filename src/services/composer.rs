//! Text composition from committed selections.

use crate::models::SelectionEvent;

/// Text buffer fed by zone selection events.
///
/// A backspace selection removes the last character; any other selection
/// appends its value (entries without a value append nothing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextComposer {
    text: String,
}

impl TextComposer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one committed selection.
    pub fn apply(&mut self, event: &SelectionEvent) {
        if event.is_backspace() {
            self.text.pop();
        } else if let Some(value) = &event.value {
            self.text.push_str(value);
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Clears the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}
