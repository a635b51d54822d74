//! Error types for response normalization.

use thiserror::Error;

/// Result type alias for normalization.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// A response that could not be parsed or lacked the expected structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(String),

    /// The document parsed but does not have the expected shape.
    #[error("unexpected response structure: {0}")]
    Structure(String),

    /// A command tree could not be serialized.
    #[error("XML serialization failed: {0}")]
    Serialize(String),
}
