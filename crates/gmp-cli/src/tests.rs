//! Router tests over a scripted daemon.

use crate::http::router;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use gmp_gateway::{ConnectorError, Credentials, Gateway, GmpSession, GmpTransport};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const AUTH_OK: &str = r#"<authenticate_response status="200" status_text="OK"/>"#;

#[derive(Default)]
struct Script {
    replies: VecDeque<String>,
    sent: Vec<String>,
    refuse: bool,
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

    fn app(&self) -> Router {
        let gateway = Gateway::with_transport(Arc::new(self.clone()), Credentials::new("admin", "s3cret"));
        router(Arc::new(gateway))
    }
}

struct MockSession {
    script: Arc<Mutex<Script>>,
}

#[async_trait]
impl GmpTransport for MockDaemon {
    async fn connect(&self) -> Result<Box<dyn GmpSession>, ConnectorError> {
        if self.script.lock().unwrap().refuse {
            return Err(ConnectorError::Transport("connection refused".into()));
        }
        Ok(Box::new(MockSession {
            script: Arc::clone(&self.script),
        }))
    }
}

#[async_trait]
impl GmpSession for MockSession {
    async fn exchange(&mut self, command: &str) -> Result<String, ConnectorError> {
        let mut script = self.script.lock().unwrap();
        script.sent.push(command.to_string());
        script
            .replies
            .pop_front()
            .ok_or_else(|| ConnectorError::Transport("script exhausted".into()))
    }
}

async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn json_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_alive_returns_version_xml() {
    let reply = r#"<get_version_response status="200" status_text="OK"><version>7.0</version></get_version_response>"#;
    let daemon = MockDaemon::replying(&[reply]);

    let (status, body) = send(daemon.app(), "GET", "/_alive", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, reply);
}

#[tokio::test]
async fn test_list_with_query_modifiers() {
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<get_port_lists_response status="200" status_text="OK"><port_list id="p-1"><name>All TCP</name></port_list></get_port_lists_response>"#,
    ]);

    let (status, body) = send(daemon.app(), "GET", "/port_lists?filter=name~TCP", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({"status": "200", "data": [{"name": "All TCP", "id": "p-1"}]})
    );
    assert_eq!(daemon.sent()[1], r#"<get_port_lists filter="name~TCP"/>"#);
}

#[tokio::test]
async fn test_create_target_returns_created() {
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<create_target_response status="201" status_text="OK, resource created" id="t-1"/>"#,
    ]);

    let (status, body) = send(
        daemon.app(),
        "POST",
        "/targets",
        r#"{"name": "lab", "hosts": ["10.0.0.1"]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json_body(&body), json!({"status": "201", "name": null, "id": "t-1"}));
}

#[tokio::test]
async fn test_missing_required_field_is_bad_request() {
    let daemon = MockDaemon::default();

    let (status, body) = send(daemon.app(), "POST", "/tasks", r#"{"name": "nightly"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json_body(&body);
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("target_id"));
    assert!(daemon.sent().is_empty());
}

#[tokio::test]
async fn test_non_object_body_is_bad_request() {
    let daemon = MockDaemon::default();

    let (status, _) = send(daemon.app(), "POST", "/targets", "[1, 2]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(daemon.app(), "POST", "/targets", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_daemon_not_found_maps_to_404() {
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<get_configs_response status="404" status_text="Failed to find config 'x'"/>"#,
    ]);

    let (status, body) = send(daemon.app(), "GET", "/configs/x", "").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["code"], 404);
}

#[tokio::test]
async fn test_unreachable_daemon_is_bad_gateway() {
    let daemon = MockDaemon::default();
    daemon.script.lock().unwrap().refuse = true;

    let (status, body) = send(daemon.app(), "GET", "/scanners", "").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(&body)["code"], 502);
}

#[tokio::test]
async fn test_start_task_and_fetch_report() {
    let report = r#"<get_reports_response status="200" status_text="OK"><report id="r-9"/></get_reports_response>"#;
    let daemon = MockDaemon::replying(&[
        AUTH_OK,
        r#"<start_task_response status="202" status_text="OK, request submitted"><report_id>r-9</report_id></start_task_response>"#,
        AUTH_OK,
        report,
    ]);

    let (status, body) = send(daemon.app(), "POST", "/tasks/task-1/start", "").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json_body(&body), json!({"status": "202", "report_id": "r-9"}));

    let (status, body) = send(
        daemon.app(),
        "GET",
        "/reports/r-9?report_format_id=fmt-xml",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, report);
    assert_eq!(
        daemon.sent()[3],
        r#"<get_reports report_id="r-9" format_id="fmt-xml"/>"#
    );
}
