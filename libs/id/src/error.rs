//! Error types for name and UID parsing.

use thiserror::Error;

/// Errors that can occur when parsing or validating resource identity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty.
    #[error("name cannot be empty")]
    Empty,

    /// The name exceeds the maximum length.
    #[error("name is {actual} characters long, maximum is {max}")]
    TooLong { max: usize, actual: usize },

    /// The name contains a character outside the allowed set.
    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// A dot-separated segment is empty or does not start and end with an
    /// alphanumeric character.
    #[error("invalid segment '{segment}': must start and end with a lowercase alphanumeric character")]
    InvalidSegment { segment: String },

    /// The UID is not a valid UUID.
    #[error("invalid UID: {0}")]
    InvalidUid(String),
}

impl IdError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty)
    }

    /// Returns true if this error is about the name's character content.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            IdError::InvalidCharacter { .. } | IdError::InvalidSegment { .. }
        )
    }
}
