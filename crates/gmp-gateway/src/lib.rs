//! # GMP Gateway
//!
//! JSON facade over the administration daemon's XML protocol. Composes the
//! keyword registry, field extractor, connector and response normalizer
//! into one async function per operation.
//!
//! ## Architecture
//!
//! ```text
//!   JSON body
//!       │
//!       ▼
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │  Extractor  │──▶│  Requests   │──▶│  Connector  │──▶│ Normalizer  │──▶ record
//! │ (registry)  │   │ (required)  │   │ (1 command) │   │ (XML→JSON)  │
//! └─────────────┘   └─────────────┘   └─────────────┘   └─────────────┘
//!                          │                 │                 │
//!                          └─────────────────┴─────────────────┴──▶ GatewayError
//! ```
//!
//! ## Operations
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`Gateway::version`] | - | raw XML |
//! | [`Gateway::list`] | kind, modifiers | [`CollectionRecord`] |
//! | [`Gateway::get`] | kind, id | [`EntityRecord`] |
//! | [`Gateway::create_target`] | body | [`EntityRecord`] |
//! | [`Gateway::create_task`] | body | [`EntityRecord`] |
//! | [`Gateway::create_credential`] | body | [`EntityRecord`] |
//! | [`Gateway::create_destination_alert`] | body | [`EntityRecord`] |
//! | [`Gateway::start_task`] | task id | [`TaskStartRecord`] |
//! | [`Gateway::get_report`] | report id, format | raw XML |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gmp_gateway::{Gateway, GatewayConfig};
//!
//! let config = GatewayConfig::load(Some(Path::new("config/gateway.toml")))?;
//! let gateway = Gateway::from_config(&config)?;
//! let scanners = gateway.list(EntityKind::Scanner, &json!({})).await?;
//! ```

mod config;
mod error;
mod gateway;

pub use config::{ConnectionConfig, CredentialsConfig, GatewayConfig, ServerConfig, ENV_PREFIX};
pub use error::{ErrorKind, GatewayError, Result};
pub use gateway::Gateway;

// Re-export component types for convenience
pub use gmp_connector::{ConnectorError, Credentials, EntityKind, GmpSession, GmpTransport};
pub use gmp_extract::ValidationError;
pub use gmp_normalize::{CollectionRecord, EntityRecord, EntityRef, NormalizeError, TaskStartRecord};
