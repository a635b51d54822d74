//! Protocol command construction.
//!
//! Every builder returns an [`Element`] tree; optional request members that
//! are absent produce no element or attribute at all.

use crate::entity::EntityKind;
use crate::requests::{
    CreateAlert, CreateCredential, CreateTarget, CreateTask, ListQuery, ReportQuery, StartTask,
};
use crate::Credentials;
use gmp_extract::WireBool;
use gmp_normalize::Element;
use gmp_registry::{EntityField, Keyword};
use tracing::debug;

/// Credential type for username + password credentials.
const CREDENTIAL_TYPE_USER_PASS: &str = "up";

pub fn get_version() -> Element {
    Element::new("get_version")
}

pub fn authenticate(credentials: &Credentials) -> Element {
    Element::new("authenticate").with_child(
        Element::new("credentials")
            .with_child(Element::new("username").with_text(credentials.username()))
            .with_child(Element::new("password").with_text(credentials.password())),
    )
}

pub fn list(kind: EntityKind, query: &ListQuery) -> Element {
    let mut command = Element::new(kind.get_command());
    if let Some(filter) = &query.filter {
        command.set_attr(EntityField::Filter.wire_name(), filter.as_str());
    }
    if let Some(filter_id) = &query.filter_id {
        command.set_attr(EntityField::FilterId.wire_name(), filter_id.as_str());
    }
    if let Some(trash) = query.trash {
        command.set_attr(EntityField::Trash.wire_name(), wire_flag(trash));
    }
    if let Some(details) = query.details {
        command.set_attr(EntityField::Details.wire_name(), wire_flag(details));
    }
    command
}

pub fn get(kind: EntityKind, id: &str) -> Element {
    Element::new(kind.get_command()).with_attr(kind.id_attribute(), id)
}

pub fn create_target(request: &CreateTarget) -> Element {
    let mut command = Element::new("create_target").with_child(text(EntityField::Name, &request.name));

    if let Some(make_unique) = request.make_unique {
        command.push_child(flag(EntityField::MakeUnique, make_unique));
    }
    if let Some(filter) = &request.asset_hosts_filter {
        command.push_child(Element::new("asset_hosts").with_attr(EntityField::Filter.wire_name(), filter.as_str()));
    }
    if !request.hosts.is_empty() {
        command.push_child(text(EntityField::Hosts, &request.hosts.join(",")));
    }
    if !request.exclude_hosts.is_empty() {
        command.push_child(text(EntityField::ExcludeHosts, &request.exclude_hosts.join(",")));
    }
    push_text(&mut command, EntityField::Comment, &request.comment);

    match (&request.ssh_credential_id, request.ssh_credential_port) {
        (Some(id), port) => {
            let mut ssh = Element::new("ssh_credential").with_attr("id", id.as_str());
            if let Some(port) = port {
                ssh.push_child(Element::new("port").with_text(port.to_wire()));
            }
            command.push_child(ssh);
        }
        (None, Some(_)) => debug!("ssh_credential_port ignored without ssh_credential_id"),
        (None, None) => {}
    }

    push_text(&mut command, EntityField::AliveTest, &request.alive_test);
    if let Some(only) = request.reverse_lookup_only {
        command.push_child(flag(EntityField::ReverseLookupOnly, only));
    }
    if let Some(unify) = request.reverse_lookup_unify {
        command.push_child(flag(EntityField::ReverseLookupUnify, unify));
    }
    push_text(&mut command, EntityField::PortRange, &request.port_range);
    if let Some(port_list_id) = &request.port_list_id {
        command.push_child(Element::new("port_list").with_attr("id", port_list_id.as_str()));
    }
    command
}

pub fn create_task(request: &CreateTask) -> Element {
    let mut command = Element::new("create_task")
        .with_child(text(EntityField::Name, &request.name))
        .with_child(Element::new("config").with_attr("id", request.config_id.as_str()))
        .with_child(Element::new("target").with_attr("id", request.target_id.as_str()))
        .with_child(Element::new("scanner").with_attr("id", request.scanner_id.as_str()));

    push_text(&mut command, EntityField::Comment, &request.comment);
    for alert_id in &request.alert_ids {
        command.push_child(Element::new("alert").with_attr("id", alert_id.as_str()));
    }
    command
}

pub fn create_credential(request: &CreateCredential) -> Element {
    let mut command = Element::new("create_credential")
        .with_child(text(EntityField::Name, &request.name))
        .with_child(Element::new("type").with_text(CREDENTIAL_TYPE_USER_PASS));

    push_text(&mut command, EntityField::Comment, &request.comment);
    if let Some(allow_insecure) = request.allow_insecure {
        command.push_child(flag(EntityField::AllowInsecure, allow_insecure));
    }
    command.push_child(text(EntityField::Login, &request.login));
    push_text(&mut command, EntityField::Password, &request.password);
    command
}

pub fn create_alert(request: &CreateAlert) -> Element {
    let mut command = Element::new("create_alert")
        .with_child(text(EntityField::Name, &request.name))
        .with_child(with_data(
            Element::new("condition").with_text(request.condition.as_str()),
            &request.condition_data,
        ))
        .with_child(with_data(
            Element::new("event").with_text(request.event.as_str()),
            &request.event_data,
        ))
        .with_child(with_data(
            Element::new("method").with_text(request.method.as_str()),
            &request.method_data,
        ));

    if let Some(filter_id) = &request.filter_id {
        command.push_child(Element::new("filter").with_attr("id", filter_id.as_str()));
    }
    push_text(&mut command, EntityField::Comment, &request.comment);
    command
}

pub fn start_task(request: &StartTask) -> Element {
    Element::new("start_task").with_attr(EntityField::TaskId.wire_name(), request.task_id.as_str())
}

pub fn get_report(query: &ReportQuery) -> Element {
    let mut command = Element::new(EntityKind::Report.get_command())
        .with_attr(EntityField::ReportId.wire_name(), query.report_id.as_str());
    if let Some(format_id) = &query.report_format_id {
        command.set_attr(EntityField::ReportFormatId.wire_name(), format_id.as_str());
    }
    command
}

/// Protocol booleans are `1` / `0`.
fn wire_flag(flag: WireBool) -> &'static str {
    if flag.as_bool() {
        "1"
    } else {
        "0"
    }
}

fn text(field: EntityField, value: &str) -> Element {
    Element::new(field.wire_name()).with_text(value)
}

fn flag(field: EntityField, value: WireBool) -> Element {
    Element::new(field.wire_name()).with_text(wire_flag(value))
}

fn push_text(command: &mut Element, field: EntityField, value: &Option<String>) {
    if let Some(value) = value {
        command.push_child(text(field, value));
    }
}

/// `<data>value<name>key</name></data>` for each entry.
fn with_data(mut element: Element, data: &[(String, String)]) -> Element {
    for (key, value) in data {
        element.push_child(
            Element::new("data")
                .with_text(value.as_str())
                .with_child(Element::new("name").with_text(key.as_str())),
        );
    }
    element
}
