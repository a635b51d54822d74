//! The gateway connector.

use crate::command;
use crate::entity::EntityKind;
use crate::error::{ConnectorError, Result};
use crate::requests::{
    CreateAlert, CreateCredential, CreateTarget, CreateTask, DestinationAlert, ListQuery,
    ReportQuery, StartTask,
};
use crate::transport::{GmpSession, GmpTransport};
use gmp_extract::{EventData, MethodData, ValidationError};
use gmp_normalize::{extract_status, extract_status_text, parse_response, Element, NormalizeError};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Account used to authenticate every call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A successful reply: the raw document and its parsed tree.
#[derive(Debug, Clone)]
pub struct GmpResponse {
    raw: String,
    root: Element,
}

impl GmpResponse {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_raw(self) -> String {
        self.raw
    }
}

/// Translates typed requests into exactly one protocol command each.
///
/// Every call opens its own session, authenticates, executes the command and
/// drops the session; nothing is reused between calls. Failures are returned
/// as-is, without retries.
///
/// # Example
///
/// ```rust,ignore
/// let transport = Arc::new(UnixSocketTransport::new("/var/run/openvasmd.sock", timeout, limit));
/// let connector = GatewayConnector::new(transport, Credentials::new("admin", secret));
/// let reply = connector.list(EntityKind::Scanner, &ListQuery::default()).await?;
/// ```
#[derive(Clone)]
pub struct GatewayConnector {
    transport: Arc<dyn GmpTransport>,
    credentials: Credentials,
}

impl GatewayConnector {
    pub fn new(transport: Arc<dyn GmpTransport>, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Daemon and protocol version. The only unauthenticated call.
    pub async fn get_version(&self) -> Result<GmpResponse> {
        let mut session = self.transport.connect().await?;
        exchange(session.as_mut(), &command::get_version()).await
    }

    pub async fn list(&self, kind: EntityKind, query: &ListQuery) -> Result<GmpResponse> {
        self.execute(command::list(kind, query)).await
    }

    /// Fetch one entity. An empty identifier is rejected before connecting.
    pub async fn get(&self, kind: EntityKind, id: &str) -> Result<GmpResponse> {
        if id.is_empty() {
            return Err(ValidationError::Missing {
                fields: vec![kind.id_attribute()],
            }
            .into());
        }
        self.execute(command::get(kind, id)).await
    }

    pub async fn create_target(&self, request: &CreateTarget) -> Result<GmpResponse> {
        self.execute(command::create_target(request)).await
    }

    pub async fn create_task(&self, request: &CreateTask) -> Result<GmpResponse> {
        self.execute(command::create_task(request)).await
    }

    pub async fn create_credential(&self, request: &CreateCredential) -> Result<GmpResponse> {
        self.execute(command::create_credential(request)).await
    }

    pub async fn create_alert(&self, request: &CreateAlert) -> Result<GmpResponse> {
        self.execute(command::create_alert(request)).await
    }

    /// Create an "always, on task status change, send to host" alert.
    pub async fn create_destination_alert(
        &self,
        name: &str,
        method: &MethodData,
        event: &EventData,
    ) -> Result<GmpResponse> {
        let alert = DestinationAlert::from_data(name, method, event)?;
        self.create_alert(&alert.into_alert()).await
    }

    pub async fn start_task(&self, request: &StartTask) -> Result<GmpResponse> {
        self.execute(command::start_task(request)).await
    }

    pub async fn get_report(&self, query: &ReportQuery) -> Result<GmpResponse> {
        self.execute(command::get_report(query)).await
    }

    /// Open a session, authenticate, run one command.
    async fn execute(&self, command: Element) -> Result<GmpResponse> {
        let mut session = self.transport.connect().await?;
        self.authenticate(session.as_mut()).await?;
        exchange(session.as_mut(), &command).await
    }

    async fn authenticate(&self, session: &mut dyn GmpSession) -> Result<()> {
        match exchange(session, &command::authenticate(&self.credentials)).await {
            Ok(_) => {
                debug!(user = self.credentials.username(), "authenticated");
                Ok(())
            }
            Err(ConnectorError::Protocol {
                status,
                status_text,
                ..
            }) => {
                warn!(user = self.credentials.username(), %status, "authentication rejected");
                Err(ConnectorError::AuthenticationFailed {
                    status,
                    status_text,
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// Send one command and check the reply's status.
async fn exchange(session: &mut dyn GmpSession, command: &Element) -> Result<GmpResponse> {
    let name = command.name().to_owned();
    debug!(command = %name, "sending command");

    let raw = session.exchange(&command.to_xml()?).await?;
    let root = parse_response(&raw)?;

    let status = extract_status(&root).ok_or_else(|| {
        NormalizeError::Structure(format!("<{}> carries no status", root.name()))
    })?;

    if !is_success(&status) {
        let status_text = extract_status_text(&root).unwrap_or_default();
        warn!(command = %name, %status, %status_text, "command rejected");
        return Err(ConnectorError::Protocol {
            command: name,
            status,
            status_text,
        });
    }

    debug!(command = %name, %status, "command succeeded");
    Ok(GmpResponse { raw, root })
}

/// Protocol statuses follow HTTP: `2xx` is success.
fn is_success(status: &str) -> bool {
    status.len() == 3 && status.starts_with('2') && status.bytes().all(|b| b.is_ascii_digit())
}
