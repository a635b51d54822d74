//! Entity kinds managed by the daemon.

use std::fmt;

/// An entity type the gateway can list and fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Scanner,
    Config,
    Target,
    Task,
    Alert,
    PortList,
    Credential,
    ReportFormat,
    Report,
}

impl EntityKind {
    pub const ALL: &'static [EntityKind] = &[
        Self::Scanner,
        Self::Config,
        Self::Target,
        Self::Task,
        Self::Alert,
        Self::PortList,
        Self::Credential,
        Self::ReportFormat,
        Self::Report,
    ];

    pub fn singular(self) -> &'static str {
        match self {
            Self::Scanner => "scanner",
            Self::Config => "config",
            Self::Target => "target",
            Self::Task => "task",
            Self::Alert => "alert",
            Self::PortList => "port_list",
            Self::Credential => "credential",
            Self::ReportFormat => "report_format",
            Self::Report => "report",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Self::Scanner => "scanners",
            Self::Config => "configs",
            Self::Target => "targets",
            Self::Task => "tasks",
            Self::Alert => "alerts",
            Self::PortList => "port_lists",
            Self::Credential => "credentials",
            Self::ReportFormat => "report_formats",
            Self::Report => "reports",
        }
    }

    /// The list/fetch command, e.g. `get_port_lists`.
    pub fn get_command(self) -> &'static str {
        match self {
            Self::Scanner => "get_scanners",
            Self::Config => "get_configs",
            Self::Target => "get_targets",
            Self::Task => "get_tasks",
            Self::Alert => "get_alerts",
            Self::PortList => "get_port_lists",
            Self::Credential => "get_credentials",
            Self::ReportFormat => "get_report_formats",
            Self::Report => "get_reports",
        }
    }

    /// The attribute selecting one entity, e.g. `port_list_id`.
    pub fn id_attribute(self) -> &'static str {
        match self {
            Self::Scanner => "scanner_id",
            Self::Config => "config_id",
            Self::Target => "target_id",
            Self::Task => "task_id",
            Self::Alert => "alert_id",
            Self::PortList => "port_list_id",
            Self::Credential => "credential_id",
            Self::ReportFormat => "report_format_id",
            Self::Report => "report_id",
        }
    }

    /// Resolve a plural spelling such as `port_lists`.
    pub fn from_plural(plural: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.plural() == plural)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}
