//! Domain error taxonomy.
//!
//! Model and gesture operations return [`KeyboardError`]. Application code wraps
//! these in `anyhow` at the CLI and configuration boundaries.

use thiserror::Error;

/// Errors raised by the keyboard core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyboardError {
    /// A character set or zone definition is structurally invalid
    /// (for example, a character set without exactly one initial entry).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An entry index fell outside its character set.
    ///
    /// Index resolution always clamps, so this only surfaces when that
    /// clamping is bypassed.
    #[error("index {index} out of range for character set of length {len}")]
    IndexOutOfRange {
        /// Requested ordinal position
        index: usize,
        /// Number of entries in the set
        len: usize,
    },

    /// A stored layout is absent, unreadable or malformed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl KeyboardError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }
}

/// Result alias for keyboard core operations.
pub type KeyboardResult<T> = Result<T, KeyboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KeyboardError::configuration("no initial entry");
        assert_eq!(err.to_string(), "configuration error: no initial entry");

        let err = KeyboardError::IndexOutOfRange { index: 9, len: 7 };
        assert_eq!(
            err.to_string(),
            "index 9 out of range for character set of length 7"
        );

        let err = KeyboardError::persistence("unexpected end of input");
        assert!(err.to_string().starts_with("persistence error"));
    }
}
