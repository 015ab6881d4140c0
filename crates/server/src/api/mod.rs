//! HTTP handlers and shared response helpers.

pub mod health;
pub mod tasks;

pub use health::{config, health, queue_status};
pub use tasks::{tasks_create, tasks_get, tasks_list};

use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use takt_store::StoreError;

// ── Error responses ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) type ApiResult<T> = Result<T, (axum::http::StatusCode, Json<ErrorResponse>)>;

pub(crate) fn bad_request(msg: impl Into<String>) -> (axum::http::StatusCode, Json<ErrorResponse>) {
    (
        axum::http::StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: msg.into() }),
    )
}

pub(crate) fn not_found(resource: &str, id: Uuid) -> (axum::http::StatusCode, Json<ErrorResponse>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("{} not found: {}", resource, id),
        }),
    )
}

/// Map a store error onto its HTTP status.
pub(crate) fn store_error(e: StoreError) -> (axum::http::StatusCode, Json<ErrorResponse>) {
    let status = axum::http::StatusCode::from_u16(e.status_code())
        .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
