//! Validation error types

use std::fmt;

/// Validation error for request bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is present but blank
    Empty { field: &'static str },

    /// Field is absent
    Missing { field: &'static str },

    /// String doesn't match required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Body could not be decoded at all
    InvalidBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidBody { reason } => f.write_str(reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject blank text.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}
