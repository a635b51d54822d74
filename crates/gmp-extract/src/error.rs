//! Validation errors.

use thiserror::Error;

/// Result type alias for required-field checks.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Raised when required fields are absent after extraction.
///
/// Absence of an optional field is not an error; this only exists so a
/// caller can reject a request before any protocol call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were missing or failed validation.
    #[error("missing or invalid required fields: {}", .fields.join(", "))]
    Missing {
        /// Canonical names of the absent fields, in the order they were required.
        fields: Vec<&'static str>,
    },
}
