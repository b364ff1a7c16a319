use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::info;

use crate::application::ContentView;
use crate::connector::api::Container;
use crate::domain::{ContentKey, DomainError, Fields, ReadOutcome, WriteOutcome};

use super::{UpdateRequest, UpsertRequest};

pub async fn run_server(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let app = create_router(container);

    info!("Serving site content on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn create_router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/content/{key}",
            get(get_content).put(put_content).patch(patch_content),
        )
        .route("/content/{key}/initialize", post(initialize_content))
        .with_state(container)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_content(
    State(container): State<Arc<Container>>,
    Path(key): Path<String>,
) -> Response {
    let key = match ContentKey::parse(&key) {
        Ok(key) => key,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let view = container.show_use_case().execute(&key).await;
    match (&view, view.to_canonical_json()) {
        (_, Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        (ContentView::Read(ReadOutcome::Failed(reason)), None) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "content_unavailable", "message": reason })),
        )
            .into_response(),
        (_, None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("No content stored for '{}'", key.collection()),
            })),
        )
            .into_response(),
    }
}

async fn put_content(
    State(container): State<Arc<Container>>,
    Path(key): Path<String>,
    Json(req): Json<UpsertRequest>,
) -> Response {
    let (key, fields) = match parse_write(&key, &req.fields) {
        Ok(parsed) => parsed,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let outcome = container
        .repository()
        .upsert_singleton(&key, req.id.as_deref(), &fields)
        .await;
    write_response(outcome)
}

async fn patch_content(
    State(container): State<Arc<Container>>,
    Path(key): Path<String>,
    Json(req): Json<UpdateRequest>,
) -> Response {
    let (key, fields) = match parse_write(&key, &req.fields) {
        Ok(parsed) => parsed,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };
    let fixed_id = match key.require_fixed_id() {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let outcome = container
        .repository()
        .update_fields(&key, fixed_id, &fields)
        .await;
    write_response(outcome)
}

async fn initialize_content(
    State(container): State<Arc<Container>>,
    Path(key): Path<String>,
) -> Response {
    let key = match ContentKey::parse(&key) {
        Ok(key) => key,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };
    let fixed_id = match key.require_fixed_id() {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };
    let defaults = match container.defaults_for(&key) {
        Some(defaults) => defaults,
        None => {
            let e = DomainError::invalid_input(format!(
                "No default content is defined for '{}'",
                key.collection()
            ));
            return error_response(StatusCode::BAD_REQUEST, e);
        }
    };

    let outcome = container
        .repository()
        .initialize_with_defaults(&key, fixed_id, &defaults)
        .await;
    write_response(outcome)
}

fn parse_write(
    key: &str,
    fields: &serde_json::Map<String, serde_json::Value>,
) -> Result<(ContentKey, Fields), DomainError> {
    Ok((ContentKey::parse(key)?, Fields::from_json_object(fields)?))
}

fn write_response(outcome: WriteOutcome) -> Response {
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(outcome)).into_response()
}

fn error_response(status: StatusCode, error: DomainError) -> Response {
    (status, Json(WriteOutcome::failed(error.to_string()))).into_response()
}
