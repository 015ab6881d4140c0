//! Health and queue status endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /config — redacted view of the active configuration.
pub async fn config(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.config.redacted_summary())
}

/// GET /queue/status — connectivity and backlog depth of the dispatch queue.
pub async fn queue_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.queue.health().await {
        Ok(h) => Json(serde_json::json!({
            "connected": h.connected,
            "provider": h.provider,
            "pending": h.approximate_message_count,
        })),
        Err(e) => Json(serde_json::json!({
            "connected": false,
            "error": e.to_string(),
        })),
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use takt_queue::{DispatchQueue, MemoryQueue};
    use takt_store::MemoryTaskStore;

    #[tokio::test]
    async fn test_health_shape() {
        let Json(resp) = health().await;
        assert_eq!(resp.status, "ok");
        assert!(!resp.version.is_empty());
    }

    #[tokio::test]
    async fn test_queue_status_reports_depth() {
        let queue = Arc::new(MemoryQueue::new("pending_tasks"));
        queue.push("{}".to_string()).await.unwrap();

        let state = Arc::new(AppState {
            store: Arc::new(MemoryTaskStore::new()),
            queue,
            config: takt_core::Config::for_profile(""),
        });

        let Json(value) = queue_status(State(state)).await;
        assert_eq!(value["connected"], true);
        assert_eq!(value["provider"], "memory");
        assert_eq!(value["pending"], 1);
    }
}
