//! # GMP Gateway Connector
//!
//! Turns one validated request into exactly one command against the
//! administration daemon. Each call runs in its own session:
//!
//! ```text
//!  connect ──▶ authenticate ──▶ command ──▶ status check ──▶ GmpResponse
//!     │              │              │              │
//!     └──────────────┴──────────────┴──────────────┴──▶ ConnectorError
//! ```
//!
//! ## Components
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`GatewayConnector`] | Per-call authenticated dispatch |
//! | [`command`] | Builders for the protocol's XML commands |
//! | [`requests`] | Typed requests with their required-field rules |
//! | [`GmpTransport`] | Seam to the daemon; [`UnixSocketTransport`] on Unix |
//!
//! ## Failure Model
//!
//! - Connection, I/O, timeout and credential failures are transport failures
//!   ([`ConnectorError::is_transport`]).
//! - A reply whose root `status` is not `2xx` is a [`ConnectorError::Protocol`]
//!   carrying the daemon's status and text.
//! - Unparseable replies are [`ConnectorError::Malformed`].
//!
//! There are no retries and no timeouts in the connector itself; the
//! transport owns both.

pub mod command;
mod connector;
mod entity;
mod error;
pub mod requests;
mod transport;

pub use connector::{Credentials, GatewayConnector, GmpResponse};
pub use entity::EntityKind;
pub use error::{ConnectorError, Result};
pub use requests::{
    AlertCondition, AlertEvent, AlertMethod, CreateAlert, CreateCredential, CreateTarget,
    CreateTask, DestinationAlert, ListQuery, ReportQuery, StartTask,
};
pub use transport::{GmpSession, GmpTransport};

#[cfg(unix)]
pub use transport::UnixSocketTransport;
