//! The gateway facade.
//!
//! Each operation takes the caller's untyped JSON body, validates it into a
//! typed request, runs exactly one connector call and normalizes the reply.
//! Required-field failures are returned before any connection is opened.

use crate::config::GatewayConfig;
use crate::error::Result;
use gmp_connector::{
    CreateCredential, CreateTarget, CreateTask, Credentials, EntityKind, GatewayConnector,
    GmpTransport, ListQuery, ReportQuery, StartTask,
};
use gmp_extract::{ArgumentSet, EventData, FieldValue, MethodData};
use gmp_normalize::{
    extract_collection, extract_created, extract_entity, extract_task_start, CollectionRecord,
    EntityRecord, TaskStartRecord,
};
use gmp_registry::EntityField;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// JSON-in, record-out front for the administration daemon.
///
/// Stateless apart from the connector; safe to share behind an `Arc` and
/// call concurrently.
///
/// # Example
///
/// ```rust,ignore
/// let gateway = Gateway::from_config(&GatewayConfig::load(None)?)?;
/// let record = gateway.create_target(&json!({"name": "lab", "hosts": ["10.0.0.1"]})).await?;
/// println!("{}", serde_json::to_string(&record)?);
/// ```
#[derive(Clone)]
pub struct Gateway {
    connector: GatewayConnector,
}

impl Gateway {
    pub fn new(connector: GatewayConnector) -> Self {
        Self { connector }
    }

    /// Gateway over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn GmpTransport>, credentials: Credentials) -> Self {
        Self::new(GatewayConnector::new(transport, credentials))
    }

    /// Gateway over the daemon's Unix socket, after validating `config`.
    #[cfg(unix)]
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;
        let transport = gmp_connector::UnixSocketTransport::new(
            &config.connection.socket_path,
            config.connection.read_timeout(),
            config.connection.max_response_bytes,
        );
        info!(
            socket = %config.connection.socket_path.display(),
            user = %config.credentials.username,
            "gateway configured"
        );
        Ok(Self::with_transport(Arc::new(transport), config.credentials()))
    }

    pub fn connector(&self) -> &GatewayConnector {
        &self.connector
    }

    /// Raw version document. Unauthenticated.
    pub async fn version(&self) -> Result<String> {
        Ok(self.connector.get_version().await?.into_raw())
    }

    /// List entities of one kind with optional `filter`, `filt_id`, `trash`
    /// and `details` modifiers taken from `body`.
    pub async fn list(&self, kind: EntityKind, body: &Value) -> Result<CollectionRecord> {
        let query = ListQuery::from_arguments(&ArgumentSet::extract_all(body));
        debug!(%kind, ?query, "list");
        let response = self.connector.list(kind, &query).await?;
        Ok(extract_collection(response.root()))
    }

    /// Fetch one entity by identifier.
    pub async fn get(&self, kind: EntityKind, id: Option<&str>) -> Result<EntityRecord> {
        let id = id.unwrap_or_default();
        let response = self.connector.get(kind, id).await?;
        Ok(extract_entity(response.root())?)
    }

    pub async fn create_target(&self, body: &Value) -> Result<EntityRecord> {
        let request = CreateTarget::from_arguments(&ArgumentSet::extract_all(body))?;
        let response = self.connector.create_target(&request).await?;
        let record = extract_created(response.root());
        info!(name = %request.name, id = ?record.id, "target created");
        Ok(record)
    }

    pub async fn create_task(&self, body: &Value) -> Result<EntityRecord> {
        let request = CreateTask::from_arguments(&ArgumentSet::extract_all(body))?;
        let response = self.connector.create_task(&request).await?;
        let record = extract_created(response.root());
        info!(name = %request.name, id = ?record.id, "task created");
        Ok(record)
    }

    /// Username + password credential.
    pub async fn create_credential(&self, body: &Value) -> Result<EntityRecord> {
        let request = CreateCredential::from_arguments(&ArgumentSet::extract_all(body))?;
        let response = self.connector.create_credential(&request).await?;
        let record = extract_created(response.root());
        info!(name = %request.name, id = ?record.id, "credential created");
        Ok(record)
    }

    /// Alert that sends a report to `send_host:send_port` whenever a task
    /// changes status. Method and event data share the body with `name`.
    pub async fn create_destination_alert(&self, body: &Value) -> Result<EntityRecord> {
        let args = ArgumentSet::extract(body, &[EntityField::Name]);
        let name = args.text(EntityField::Name).unwrap_or_default();
        let method = MethodData::extract_all(body);
        let event = EventData::extract_all(body);

        let response = self
            .connector
            .create_destination_alert(name, &method, &event)
            .await?;
        let record = extract_created(response.root());
        info!(%name, id = ?record.id, "alert created");
        Ok(record)
    }

    pub async fn start_task(&self, task_id: Option<&str>) -> Result<TaskStartRecord> {
        let args = identified(&Value::Null, EntityField::TaskId, task_id);
        let request = StartTask::from_arguments(&args)?;
        let response = self.connector.start_task(&request).await?;
        let record = extract_task_start(response.root());
        info!(task = %request.task_id, report = ?record.report_id, "task started");
        Ok(record)
    }

    /// Raw report document. `body` may carry `report_format_id`.
    pub async fn get_report(&self, report_id: Option<&str>, body: &Value) -> Result<String> {
        let args = identified(body, EntityField::ReportId, report_id);
        let query = ReportQuery::from_arguments(&args)?;
        Ok(self.connector.get_report(&query).await?.into_raw())
    }
}

/// Extract `body`, letting a non-empty identifier from outside the body win.
fn identified(body: &Value, field: EntityField, id: Option<&str>) -> ArgumentSet {
    let mut args = ArgumentSet::extract_all(body);
    if let Some(id) = id.filter(|id| !id.is_empty()) {
        args.insert(field, FieldValue::Text(id.to_owned()));
    }
    args
}
