//! Error types for the gateway facade.

use gmp_connector::ConnectorError;
use gmp_extract::ValidationError;
use gmp_normalize::NormalizeError;
use gmp_registry::KeywordError;
use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Unified error type for gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required request fields were absent or invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A field name outside the registry was resolved from text.
    #[error(transparent)]
    Keyword(#[from] KeywordError),

    /// Connector passthrough.
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    /// A successful reply could not be normalized.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse failure classes callers map to their own representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required fields missing; no protocol call was attempted.
    ValidationAbsent,
    /// Programming error: unregistered keyword.
    UnknownKeyword,
    /// Daemon unreachable or session not established.
    TransportFailure,
    /// Daemon rejected the command.
    ProtocolFailure,
    /// Reply unparseable or shaped unexpectedly.
    MalformedResponse,
    /// Startup configuration problem.
    Configuration,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationAbsent,
            Self::Keyword(_) => ErrorKind::UnknownKeyword,
            Self::Normalize(_) => ErrorKind::MalformedResponse,
            Self::Config(_) => ErrorKind::Configuration,
            Self::Connector(err) => match err {
                ConnectorError::Validation(_) => ErrorKind::ValidationAbsent,
                ConnectorError::Malformed(_) => ErrorKind::MalformedResponse,
                ConnectorError::Protocol { .. } => ErrorKind::ProtocolFailure,
                _ => ErrorKind::TransportFailure,
            },
        }
    }

    /// The daemon's status code, for protocol failures.
    pub fn protocol_status(&self) -> Option<&str> {
        match self {
            Self::Connector(ConnectorError::Protocol { status, .. }) => Some(status),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for GatewayError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
