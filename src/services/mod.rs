//! Service layer.
//!
//! Geometry math, layout persistence and text composition used by the
//! application controller and the CLI.

pub mod composer;
pub mod geometry;
pub mod layout_store;

// Re-export commonly used types and functions
pub use composer::TextComposer;
pub use layout_store::{FileStorage, LayoutStorage, LayoutStore, MemoryStorage};
