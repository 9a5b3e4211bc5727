//! Compiled-in five-zone layout used when nothing has been persisted.

use crate::error::KeyboardResult;
use crate::models::character_set::{CharacterEntry, CharacterSet};
use crate::models::zone::Zone;
use crate::models::zone_collection::ZoneCollection;

/// Builds the canonical five-zone layout with the given character spacing.
///
/// The thumb zone carries return, space (initial) and backspace; the four
/// finger zones split the alphabet.
pub fn default_layout(step: f64) -> KeyboardResult<ZoneCollection> {
    let thumb = CharacterSet::new(vec![
        CharacterEntry::new("return", "↵", Some("\n".to_string())),
        CharacterEntry::new("space", "→", Some(" ".to_string())).as_initial(),
        CharacterEntry::new("backspace", "←", None),
    ])?;

    ZoneCollection::new(vec![
        Zone::new("thumb", step, thumb)?,
        Zone::new("second", step, CharacterSet::from_chars("abcdefg")?)?,
        Zone::new("third", step, CharacterSet::from_chars("hijklmn")?)?,
        Zone::new("fourth", step, CharacterSet::from_chars("opqrst")?)?,
        Zone::new("fifth", step, CharacterSet::from_chars("uvwxyz")?)?,
    ])
}
