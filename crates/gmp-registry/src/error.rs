//! Error types for the keyword registry.

use crate::keywords::Namespace;
use thiserror::Error;

/// Result type alias for registry lookups.
pub type Result<T> = std::result::Result<T, KeywordError>;

/// Errors raised when a string is resolved against the registry.
///
/// Code paths inside the gateway reference keywords through the enums and
/// never see this error; it surfaces only when a name arrives as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeywordError {
    /// The name is not part of the namespace's closed set.
    #[error("unknown {namespace} keyword: {name}")]
    Unknown {
        /// Namespace that was searched.
        namespace: Namespace,
        /// The offending name.
        name: String,
    },
}
