//! Error types for leadrec.
//!
//! All errors are strongly typed using thiserror. A malformed record is
//! fatal for the whole batch: every downstream resolution depends on a
//! consistent index, so there is no partial recovery.

use thiserror::Error;

/// Validation errors raised while extracting a record's identity.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    #[error("Field '{field}' must be a {expected}")]
    InvalidFieldType {
        field: String,
        expected: &'static str,
    },

    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' holds an unparseable timestamp: {value:?}")]
    InvalidTimestamp { field: String, value: String },
}

/// Top-level error type for leadrec.
///
/// Covers validation failures from the reconciler itself plus the I/O and
/// serialization failures of the document collaborators.
#[derive(Debug, Error)]
pub enum DedupeError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DedupeError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an I/O error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type alias for leadrec operations.
pub type DedupeResult<T> = Result<T, DedupeError>;
