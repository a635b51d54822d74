//! HTTP binding: routes, body parsing and error mapping.
//!
//! | Route | Operation |
//! |-------|-----------|
//! | `GET /_alive` | daemon version, raw XML |
//! | `GET /<plural>` | list |
//! | `GET /<plural>/:id` | get (`/reports/:id` returns raw XML) |
//! | `POST /targets`, `/tasks`, `/credentials`, `/alerts` | create |
//! | `POST /tasks/:id/start` | start task |

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, MethodRouter};
use axum::{Json, Router};
use gmp_gateway::{
    CollectionRecord, EntityKind, EntityRecord, ErrorKind, Gateway, GatewayError, TaskStartRecord,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<Gateway>,
}

/// Build the router for every entity kind.
pub fn router(gateway: Arc<Gateway>) -> Router {
    let mut router = Router::new().route("/_alive", get(alive));

    for &kind in EntityKind::ALL {
        let mut collection: MethodRouter<AppState> = get(
            move |state: State<AppState>, Query(query): Query<HashMap<String, String>>, body: Bytes| {
                list(state, kind, query, body)
            },
        );
        collection = match kind {
            EntityKind::Target => collection.post(create_target),
            EntityKind::Task => collection.post(create_task),
            EntityKind::Credential => collection.post(create_credential),
            EntityKind::Alert => collection.post(create_alert),
            _ => collection,
        };

        let item: MethodRouter<AppState> = match kind {
            EntityKind::Report => get(report),
            _ => get(move |state: State<AppState>, Path(id): Path<String>| fetch(state, kind, id)),
        };

        router = router
            .route(&format!("/{}", kind.plural()), collection)
            .route(&format!("/{}/:id", kind.plural()), item);
    }

    router
        .route("/tasks/:id/start", post(start_task))
        .with_state(AppState { gateway })
}

/// Bind `address` and serve until Ctrl-C.
pub async fn serve(gateway: Gateway, address: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(address).await.map_err(|e| {
        error!(error = %e, %address, "failed to bind");
        e
    })?;
    info!(%address, "gateway listening");

    axum::serve(listener, router(Arc::new(gateway)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "cannot listen for shutdown signal");
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn alive(State(state): State<AppState>) -> Result<Response, ApiError> {
    Ok(xml(state.gateway.version().await?))
}

async fn list(
    State(state): State<AppState>,
    kind: EntityKind,
    query: HashMap<String, String>,
    body: Bytes,
) -> Result<Json<CollectionRecord>, ApiError> {
    let mut body = parse_body(&body)?;
    overlay_query(&mut body, query);
    Ok(Json(state.gateway.list(kind, &Value::Object(body)).await?))
}

async fn fetch(
    State(state): State<AppState>,
    kind: EntityKind,
    id: String,
) -> Result<Json<EntityRecord>, ApiError> {
    Ok(Json(state.gateway.get(kind, Some(&id)).await?))
}

async fn create_target(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<EntityRecord>), ApiError> {
    let body = Value::Object(parse_body(&body)?);
    Ok((StatusCode::CREATED, Json(state.gateway.create_target(&body).await?)))
}

async fn create_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<EntityRecord>), ApiError> {
    let body = Value::Object(parse_body(&body)?);
    Ok((StatusCode::CREATED, Json(state.gateway.create_task(&body).await?)))
}

async fn create_credential(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<EntityRecord>), ApiError> {
    let body = Value::Object(parse_body(&body)?);
    Ok((
        StatusCode::CREATED,
        Json(state.gateway.create_credential(&body).await?),
    ))
}

async fn create_alert(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<EntityRecord>), ApiError> {
    let body = Value::Object(parse_body(&body)?);
    Ok((
        StatusCode::CREATED,
        Json(state.gateway.create_destination_alert(&body).await?),
    ))
}

async fn start_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<TaskStartRecord>), ApiError> {
    Ok((
        StatusCode::ACCEPTED,
        Json(state.gateway.start_task(Some(&id)).await?),
    ))
}

async fn report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let mut body = Map::new();
    overlay_query(&mut body, query);
    Ok(xml(
        state.gateway.get_report(Some(&id), &Value::Object(body)).await?,
    ))
}

fn xml(document: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml")], document).into_response()
}

/// An empty body is an empty object; anything else must be a JSON object.
fn parse_body(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::Body("expected a JSON object".into())),
        Err(e) => Err(ApiError::Body(e.to_string())),
    }
}

/// Query parameters override body fields of the same name.
fn overlay_query(body: &mut Map<String, Value>, query: HashMap<String, String>) {
    for (key, value) in query {
        body.insert(key, Value::String(value));
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Handler failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    Body(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        let err = match self {
            Self::Body(_) => return StatusCode::BAD_REQUEST,
            Self::Gateway(err) => err,
        };
        match err.kind() {
            ErrorKind::ValidationAbsent => StatusCode::BAD_REQUEST,
            ErrorKind::ProtocolFailure if err.protocol_status() == Some("404") => {
                StatusCode::NOT_FOUND
            }
            ErrorKind::ProtocolFailure
            | ErrorKind::TransportFailure
            | ErrorKind::MalformedResponse => StatusCode::BAD_GATEWAY,
            ErrorKind::UnknownKeyword | ErrorKind::Configuration => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}
