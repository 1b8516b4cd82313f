//! Error types for recordbook.

use crate::record::Field;
use thiserror::Error;

/// Result type for record validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a manually entered record is rejected.
///
/// Only two messages are ever shown to the user; the offending field is kept
/// for callers that want to highlight it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A name, email or mobile value does not have the expected shape.
    #[error("Invalid input in one or more fields")]
    InvalidInput { field: Field },

    /// A field is empty after trimming.
    #[error("All fields must be filled")]
    MissingFields { field: Field },
}

impl ValidationError {
    /// The first field that failed validation.
    pub fn field(&self) -> Field {
        match self {
            Self::InvalidInput { field } | Self::MissingFields { field } => *field,
        }
    }
}
