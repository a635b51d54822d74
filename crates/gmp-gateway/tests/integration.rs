//! # GMP Gateway Integration Tests
//!
//! End-to-end tests: JSON body in, normalized record out, over a scripted
//! daemon.
//!
//! | Behavior | Test |
//! |----------|------|
//! | Only supplied optional fields reach the wire | `test_create_target_sends_only_supplied_fields` |
//! | Required fields checked before connecting | `test_create_target_without_name_never_connects` |
//! | Entity read from the root's first child | `test_get_reads_first_child_entity` |
//! | Incomplete collection entries dropped | `test_list_normalizes_collection` |
//! | Daemon diagnostics surfaced | `test_protocol_failure_is_surfaced` |

use async_trait::async_trait;
use gmp_connector::Result as ConnectorResult;
use gmp_gateway::{
    ConnectorError, Credentials, EntityKind, ErrorKind, Gateway, GmpSession, GmpTransport,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const AUTH_OK: &str = r#"<authenticate_response status="200" status_text="OK"/>"#;

#[derive(Default)]
struct Script {
    replies: VecDeque<String>,
    sent: Vec<String>,
    connects: usize,
}

#[derive(Clone, Default)]
struct MockDaemon {
    script: Arc<Mutex<Script>>,
}

impl MockDaemon {
    fn replying(replies: &[&str]) -> Self {
        let daemon = Self::default();
        daemon.script.lock().unwrap().replies = replies.iter().map(|r| r.to_string()).collect();
        daemon
    }

    fn sent(&self) -> Vec<String> {
        self.script.lock().unwrap().sent.clone()
    }

    fn connects(&self) -> usize {
        self.script.lock().unwrap().connects
    }

    fn gateway(&self) -> Gateway {
        Gateway::with_transport(Arc::new(self.clone()), Credentials::new("admin", "s3cret"))
    }
}

struct MockSession {
    script: Arc<Mutex<Script>>,
}

#[async_trait]
impl GmpTransport for MockDaemon {
    async fn connect(&self) -> ConnectorResult<Box<dyn GmpSession>> {
        self.script.lock().unwrap().connects += 1;
        Ok(Box::new(MockSession {
            script: Arc::clone(&self.script),
        }))
    }
}

#[async_trait]
impl GmpSession for MockSession {
    async fn exchange(&mut self, command: &str) -> ConnectorResult<String> {
        let mut script = self.script.lock().unwrap();
        script.sent.push(command.to_string());
        script
            .replies
            .pop_front()
            .ok_or_else(|| ConnectorError::Transport("script exhausted".into()))
    }
}

#[tokio::test]
async fn test_create_target_sends_only_supplied_fields() {
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<create_target_response status="201" status_text="OK, resource created" id="t-1"/>"#,
    ]);

    let record = daemon
        .gateway()
        .create_target(&json!({
            "name": "lab",
            "hosts": ["10.0.0.1", "10.0.0.2"],
            "port_range": "1-1024",
            "make_unique": true,
            "ssh_credential_port": "99999"
        }))
        .await
        .unwrap();

    assert_eq!(record.status.as_deref(), Some("201"));
    assert_eq!(record.id.as_deref(), Some("t-1"));
    assert_eq!(record.name, None);

    let sent = daemon.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].starts_with("<authenticate>"));
    assert_eq!(
        sent[1],
        "<create_target><name>lab</name><hosts>10.0.0.1,10.0.0.2</hosts><port_range>1-1024</port_range></create_target>"
    );
}

#[tokio::test]
async fn test_create_target_without_name_never_connects() {
    let daemon = MockDaemon::default();

    let err = daemon
        .gateway()
        .create_target(&json!({"hosts": ["10.0.0.1"]}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ValidationAbsent);
    assert!(err.to_string().contains("name"));
    assert_eq!(daemon.connects(), 0);
}

#[tokio::test]
async fn test_create_task_reports_every_missing_field() {
    let daemon = MockDaemon::default();

    let err = daemon
        .gateway()
        .create_task(&json!({"name": "nightly", "config_id": ""}))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("config_id"));
    assert!(message.contains("target_id"));
    assert!(message.contains("scanner_id"));
    assert_eq!(daemon.connects(), 0);
}

#[tokio::test]
async fn test_get_without_id_never_connects() {
    let daemon = MockDaemon::default();

    for id in [None, Some("")] {
        let err = daemon.gateway().get(EntityKind::Target, id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationAbsent);
    }
    assert_eq!(daemon.connects(), 0);
}

#[tokio::test]
async fn test_get_reads_first_child_entity() {
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<get_targets_response status="200" status_text="OK" id="root-id">
             <target id="t-1"><name>lab</name><hosts>10.0.0.1</hosts></target>
           </get_targets_response>"#,
    ]);

    let record = daemon.gateway().get(EntityKind::Target, Some("t-1")).await.unwrap();

    assert_eq!(record.status.as_deref(), Some("200"));
    assert_eq!(record.name.as_deref(), Some("lab"));
    assert_eq!(record.id.as_deref(), Some("t-1"));
    assert_eq!(daemon.sent()[1], r#"<get_targets target_id="t-1"/>"#);
}

#[tokio::test]
async fn test_list_normalizes_collection() {
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<get_scanners_response status="200" status_text="OK">
             <scanner id="s-1"><name>OpenVAS Default</name></scanner>
             <scanner id="s-2"><name>CVE</name></scanner>
             <filters id=""><term>first=1 rows=10</term></filters>
           </get_scanners_response>"#,
    ]);

    let record = daemon
        .gateway()
        .list(EntityKind::Scanner, &json!({"details": "True", "trash": "yes"}))
        .await
        .unwrap();

    assert_eq!(record.len(), 2);
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "status": "200",
            "data": [
                {"name": "OpenVAS Default", "id": "s-1"},
                {"name": "CVE", "id": "s-2"}
            ]
        })
    );
    assert_eq!(daemon.sent()[1], r#"<get_scanners details="1"/>"#);
}

#[tokio::test]
async fn test_protocol_failure_is_surfaced() {
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<get_tasks_response status="404" status_text="Failed to find task 'x'"/>"#,
    ]);

    let err = daemon.gateway().get(EntityKind::Task, Some("x")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ProtocolFailure);
    assert_eq!(err.protocol_status(), Some("404"));
    assert!(err.to_string().contains("Failed to find task"));
}

#[tokio::test]
async fn test_start_task_returns_report_id() {
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<start_task_response status="202" status_text="OK, request submitted"><report_id>r-9</report_id></start_task_response>"#,
    ]);

    let record = daemon.gateway().start_task(Some("task-1")).await.unwrap();

    assert_eq!(record.status.as_deref(), Some("202"));
    assert_eq!(record.report_id.as_deref(), Some("r-9"));
    assert_eq!(daemon.sent()[1], r#"<start_task task_id="task-1"/>"#);
}

#[tokio::test]
async fn test_destination_alert_uses_wire_names() {
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<create_alert_response status="201" status_text="OK, resource created" id="a-1"/>"#,
    ]);

    let record = daemon
        .gateway()
        .create_destination_alert(&json!({
            "name": "to-siem",
            "send_host": "siem.local",
            "send_port": 6514,
            "send_report_format": "fmt-1",
            "status": "Done"
        }))
        .await
        .unwrap();

    assert_eq!(record.id.as_deref(), Some("a-1"));
    let command = &daemon.sent()[1];
    assert!(command.contains("<condition>Always</condition>"));
    assert!(command.contains("<event>Task run status changed<data>Done<name>status</name></data></event>"));
    assert!(command.contains("<data>siem.local<name>send_host</name></data>"));
    assert!(command.contains("<data>6514<name>send_port</name></data>"));
    assert!(command.contains("<data>fmt-1<name>send_repot_format</name></data>"));
}

#[tokio::test]
async fn test_destination_alert_requires_port() {
    let daemon = MockDaemon::default();

    let err = daemon
        .gateway()
        .create_destination_alert(&json!({"name": "to-siem", "send_host": "siem.local"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ValidationAbsent);
    assert!(err.to_string().contains("send_port"));
    assert_eq!(daemon.connects(), 0);
}

#[tokio::test]
async fn test_get_report_passes_format_and_returns_raw() {
    let reply = r#"<get_reports_response status="200" status_text="OK"><report id="r-9"/></get_reports_response>"#;
    let daemon = MockDaemon::replying(&[AUTH_OK, reply]);

    let raw = daemon
        .gateway()
        .get_report(Some("r-9"), &json!({"report_format_id": "fmt-xml"}))
        .await
        .unwrap();

    assert_eq!(raw, reply);
    assert_eq!(
        daemon.sent()[1],
        r#"<get_reports report_id="r-9" format_id="fmt-xml"/>"#
    );
}

#[tokio::test]
async fn test_version_skips_authentication() {
    let reply = r#"<get_version_response status="200" status_text="OK"><version>7.0</version></get_version_response>"#;
    let daemon = MockDaemon::replying(&[reply]);

    let raw = daemon.gateway().version().await.unwrap();

    assert_eq!(raw, reply);
    assert_eq!(daemon.sent(), vec!["<get_version/>".to_string()]);
}
