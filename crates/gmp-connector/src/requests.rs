//! Typed requests built from validated argument sets.
//!
//! Each `from_arguments` constructor checks the operation's required fields
//! up front and copies optional fields through as `Option`/empty, so a
//! missing optional value is never turned into a default on the wire.

use gmp_extract::{ArgumentSet, EventData, MethodData, Port, Result, ValidationError, WireBool};
use gmp_registry::{EntityField, EventDataField, Keyword, MethodDataField};

/// Optional modifiers of a list query.
///
/// `filter` and `filter_id` may both be set; choosing between them is the
/// caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub filter_id: Option<String>,
    pub trash: Option<WireBool>,
    pub details: Option<WireBool>,
}

impl ListQuery {
    pub fn from_arguments(args: &ArgumentSet) -> Self {
        Self {
            filter: args.text(EntityField::Filter).map(str::to_owned),
            filter_id: args.text(EntityField::FilterId).map(str::to_owned),
            trash: args.flag(EntityField::Trash),
            details: args.flag(EntityField::Details),
        }
    }
}

/// `create_target`. Requires `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTarget {
    pub name: String,
    pub comment: Option<String>,
    pub make_unique: Option<WireBool>,
    pub asset_hosts_filter: Option<String>,
    pub hosts: Vec<String>,
    pub exclude_hosts: Vec<String>,
    pub ssh_credential_id: Option<String>,
    pub ssh_credential_port: Option<Port>,
    pub alive_test: Option<String>,
    pub reverse_lookup_only: Option<WireBool>,
    pub reverse_lookup_unify: Option<WireBool>,
    pub port_range: Option<String>,
    pub port_list_id: Option<String>,
}

impl CreateTarget {
    pub const REQUIRED: &'static [EntityField] = &[EntityField::Name];

    pub fn from_arguments(args: &ArgumentSet) -> Result<Self> {
        args.ensure_present(Self::REQUIRED)?;
        Ok(Self {
            name: args.require_text(EntityField::Name)?.to_owned(),
            comment: owned(args, EntityField::Comment),
            make_unique: args.flag(EntityField::MakeUnique),
            asset_hosts_filter: owned(args, EntityField::AssetHostsFilter),
            hosts: args.list(EntityField::Hosts).to_vec(),
            exclude_hosts: args.list(EntityField::ExcludeHosts).to_vec(),
            ssh_credential_id: owned(args, EntityField::SshCredentialId),
            ssh_credential_port: args.port(EntityField::SshCredentialPort),
            alive_test: owned(args, EntityField::AliveTest),
            reverse_lookup_only: args.flag(EntityField::ReverseLookupOnly),
            reverse_lookup_unify: args.flag(EntityField::ReverseLookupUnify),
            port_range: owned(args, EntityField::PortRange),
            port_list_id: owned(args, EntityField::PortListId),
        })
    }
}

/// `create_task`. Requires `name`, `config_id`, `target_id` and `scanner_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTask {
    pub name: String,
    pub config_id: String,
    pub target_id: String,
    pub scanner_id: String,
    pub comment: Option<String>,
    pub alert_ids: Vec<String>,
}

impl CreateTask {
    pub const REQUIRED: &'static [EntityField] = &[
        EntityField::Name,
        EntityField::ConfigId,
        EntityField::TargetId,
        EntityField::ScannerId,
    ];

    pub fn from_arguments(args: &ArgumentSet) -> Result<Self> {
        args.ensure_present(Self::REQUIRED)?;
        Ok(Self {
            name: args.require_text(EntityField::Name)?.to_owned(),
            config_id: args.require_text(EntityField::ConfigId)?.to_owned(),
            target_id: args.require_text(EntityField::TargetId)?.to_owned(),
            scanner_id: args.require_text(EntityField::ScannerId)?.to_owned(),
            comment: owned(args, EntityField::Comment),
            alert_ids: args.list(EntityField::AlertIds).to_vec(),
        })
    }
}

/// `create_credential` of the username + password type.
/// Requires `name` and `login`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CreateCredential {
    pub name: String,
    pub login: String,
    pub password: Option<String>,
    pub comment: Option<String>,
    pub allow_insecure: Option<WireBool>,
}

impl CreateCredential {
    pub const REQUIRED: &'static [EntityField] = &[EntityField::Name, EntityField::Login];

    pub fn from_arguments(args: &ArgumentSet) -> Result<Self> {
        args.ensure_present(Self::REQUIRED)?;
        Ok(Self {
            name: args.require_text(EntityField::Name)?.to_owned(),
            login: args.require_text(EntityField::Login)?.to_owned(),
            password: owned(args, EntityField::Password),
            comment: owned(args, EntityField::Comment),
            allow_insecure: args.flag(EntityField::AllowInsecure),
        })
    }
}

impl std::fmt::Debug for CreateCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateCredential")
            .field("name", &self.name)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("comment", &self.comment)
            .field("allow_insecure", &self.allow_insecure)
            .finish()
    }
}

/// `start_task`. Requires `task_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTask {
    pub task_id: String,
}

impl StartTask {
    pub fn from_arguments(args: &ArgumentSet) -> Result<Self> {
        Ok(Self {
            task_id: args.require_text(EntityField::TaskId)?.to_owned(),
        })
    }
}

/// A report fetch. Requires `report_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub report_id: String,
    pub report_format_id: Option<String>,
}

impl ReportQuery {
    pub fn from_arguments(args: &ArgumentSet) -> Result<Self> {
        Ok(Self {
            report_id: args.require_text(EntityField::ReportId)?.to_owned(),
            report_format_id: owned(args, EntityField::ReportFormatId),
        })
    }
}

/// When an alert fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCondition {
    Always,
    SeverityAtLeast,
    SeverityChanged,
    FilterCountAtLeast,
    FilterCountChanged,
}

impl AlertCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::SeverityAtLeast => "Severity at least",
            Self::SeverityChanged => "Severity changed",
            Self::FilterCountAtLeast => "Filter count at least",
            Self::FilterCountChanged => "Filter count changed",
        }
    }
}

/// What triggers an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEvent {
    TaskRunStatusChanged,
    NewSecInfoArrived,
    UpdatedSecInfoArrived,
}

impl AlertEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaskRunStatusChanged => "Task run status changed",
            Self::NewSecInfoArrived => "New SecInfo arrived",
            Self::UpdatedSecInfoArrived => "Updated SecInfo arrived",
        }
    }
}

/// How an alert is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertMethod {
    SendToHost,
    Scp,
    Email,
    Syslog,
    HttpGet,
    StartTask,
}

impl AlertMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SendToHost => "Send",
            Self::Scp => "SCP",
            Self::Email => "Email",
            Self::Syslog => "Syslog",
            Self::HttpGet => "HTTP Get",
            Self::StartTask => "Start Task",
        }
    }
}

/// Generic `create_alert`.
///
/// Data entries are `(wire name, value)` pairs emitted in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAlert {
    pub name: String,
    pub condition: AlertCondition,
    pub event: AlertEvent,
    pub method: AlertMethod,
    pub condition_data: Vec<(String, String)>,
    pub event_data: Vec<(String, String)>,
    pub method_data: Vec<(String, String)>,
    pub filter_id: Option<String>,
    pub comment: Option<String>,
}

/// The one alert shape most callers need: on every task status change,
/// send a report to a host.
///
/// Only the destination and the status filter vary. Requires `name`,
/// `send_host` and `send_port`; the report format and status filter are
/// left to the daemon when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationAlert {
    pub name: String,
    pub send_host: String,
    pub send_port: Port,
    pub send_report_format: Option<String>,
    pub status: Option<String>,
}

impl DestinationAlert {
    pub fn from_data(name: &str, method: &MethodData, event: &EventData) -> Result<Self> {
        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push(EntityField::Name.canonical_name());
        }
        let send_host = method.text(MethodDataField::SendHost);
        if send_host.is_none() {
            missing.push(MethodDataField::SendHost.canonical_name());
        }
        let send_port = method.port(MethodDataField::SendPort);
        if send_port.is_none() {
            missing.push(MethodDataField::SendPort.canonical_name());
        }

        match (send_host, send_port) {
            (Some(host), Some(port)) if missing.is_empty() => Ok(Self {
                name: name.to_owned(),
                send_host: host.to_owned(),
                send_port: port,
                send_report_format: method
                    .text(MethodDataField::SendReportFormat)
                    .map(str::to_owned),
                status: event.text(EventDataField::Status).map(str::to_owned),
            }),
            _ => Err(ValidationError::Missing { fields: missing }),
        }
    }

    /// Expand into the generic alert with the fixed condition, event and method.
    pub fn into_alert(self) -> CreateAlert {
        let mut method_data = vec![
            (MethodDataField::SendHost.wire_name().to_owned(), self.send_host),
            (MethodDataField::SendPort.wire_name().to_owned(), self.send_port.to_wire()),
        ];
        if let Some(format) = self.send_report_format {
            method_data.push((MethodDataField::SendReportFormat.wire_name().to_owned(), format));
        }

        let event_data = self
            .status
            .map(|status| vec![(EventDataField::Status.wire_name().to_owned(), status)])
            .unwrap_or_default();

        CreateAlert {
            name: self.name,
            condition: AlertCondition::Always,
            event: AlertEvent::TaskRunStatusChanged,
            method: AlertMethod::SendToHost,
            condition_data: Vec::new(),
            event_data,
            method_data,
            filter_id: None,
            comment: None,
        }
    }
}

fn owned(args: &ArgumentSet, field: EntityField) -> Option<String> {
    args.text(field).map(str::to_owned)
}
