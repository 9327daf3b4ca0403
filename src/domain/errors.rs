//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided ID contains characters that are not allowed in a path segment.
    InvalidId(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "record ID cannot be empty"),
            Self::InvalidId(id) => write!(f, "invalid record ID: {}", id),
        }
    }
}

impl std::error::Error for ValidationError {}
