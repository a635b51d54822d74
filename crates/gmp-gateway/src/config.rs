//! Configuration types for the gateway.

use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use gmp_connector::Credentials;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix, e.g. `GMP_GATEWAY__CREDENTIALS__PASSWORD`.
pub const ENV_PREFIX: &str = "GMP_GATEWAY";

/// Configuration for the gateway and its HTTP surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Daemon connection settings.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Account used to authenticate every call.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
}

impl GatewayConfig {
    /// Load configuration.
    ///
    /// Later sources override earlier ones:
    /// 1. built-in defaults
    /// 2. the TOML file at `path`, when given (must exist)
    /// 3. environment variables prefixed with `GMP_GATEWAY__`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let settings: GatewayConfig = config.try_deserialize()?;
        Ok(settings)
    }

    /// Reject settings that can never produce a working gateway.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.username.is_empty() {
            return Err(GatewayError::Config("credentials.username is empty".into()));
        }
        if self.credentials.password.is_empty() {
            return Err(GatewayError::Config("credentials.password is empty".into()));
        }
        if self.connection.read_timeout_secs == 0 {
            return Err(GatewayError::Config(
                "connection.read_timeout_secs must be positive".into(),
            ));
        }
        if self.connection.max_response_bytes == 0 {
            return Err(GatewayError::Config(
                "connection.max_response_bytes must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.credentials.username, &self.credentials.password)
    }
}

/// Daemon connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Path to the daemon's Unix domain socket.
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,

    /// Connect and per-read timeout, in seconds.
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Largest reply accepted from the daemon.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl ConnectionConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            read_timeout_secs: default_read_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

/// Gateway account. The password has no default.
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_socket_path() -> PathBuf {
    PathBuf::from("/var/run/openvasmd.sock")
}

fn default_read_timeout_secs() -> u64 {
    30
}

fn default_max_response_bytes() -> usize {
    16 * 1024 * 1024 // 16 MiB
}

fn default_username() -> String {
    "admin".into()
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    5000
}
