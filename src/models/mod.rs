//! Data models for zones, character sets and selection events.
//!
//! Models are independent of input handling and persistence. Each type that is
//! stored has a matching `*Record` with the durable fields only.

pub mod character_set;
pub mod defaults;
pub mod selection;
pub mod zone;
pub mod zone_collection;

// Re-export all model types
pub use character_set::{CharSetRecord, CharacterEntry, CharacterRecord, CharacterSet};
pub use defaults::default_layout;
pub use selection::SelectionEvent;
pub use zone::{Zone, ZoneRecord};
pub use zone_collection::ZoneCollection;
