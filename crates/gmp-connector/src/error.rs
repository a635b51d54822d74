//! Error types for the gateway connector.

use gmp_extract::ValidationError;
use gmp_normalize::NormalizeError;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for connector operations.
pub type Result<T> = std::result::Result<T, ConnectorError>;

/// Failures surfaced by a connector call.
///
/// Nothing is retried or swallowed; every variant reaches the caller.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The daemon could not be reached or the connection broke.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Socket-level I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The daemon did not answer within the transport's read timeout.
    #[error("no response from daemon within {0:?}")]
    Timeout(Duration),

    /// The response grew past the configured size limit.
    #[error("response exceeded {limit} bytes")]
    ResponseTooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },

    /// The daemon rejected the session credentials.
    #[error("authentication rejected ({status}): {status_text}")]
    AuthenticationFailed {
        /// Protocol status code.
        status: String,
        /// Diagnostic text from the daemon.
        status_text: String,
    },

    /// The daemon accepted the connection but rejected the command.
    #[error("{command} rejected ({status}): {status_text}")]
    Protocol {
        /// Name of the rejected command.
        command: String,
        /// Protocol status code.
        status: String,
        /// Diagnostic text from the daemon.
        status_text: String,
    },

    /// The response could not be parsed or had no status.
    #[error(transparent)]
    Malformed(#[from] NormalizeError),

    /// A request was built without its required fields.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ConnectorError {
    /// Whether the failure happened before a command could be executed:
    /// unreachable daemon, broken stream, or rejected credentials.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::Io(_)
                | Self::Timeout(_)
                | Self::ResponseTooLarge { .. }
                | Self::AuthenticationFailed { .. }
        )
    }
}
