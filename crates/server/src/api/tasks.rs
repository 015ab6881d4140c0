//! Task CRUD endpoints with cron validation and timestamp localization.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, FixedOffset, Months, NaiveDateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use takt_core::time::localize_naive;
use takt_store::{NewTask, Task};

use crate::state::AppState;

use super::{bad_request, not_found, store_error, ApiResult};

// ── Request types ────────────────────────────────────────────────

/// A client timestamp: either offset-aware (taken as-is) or naive
/// (interpreted in the configured local zone). Conversion to UTC happens
/// here, at the write boundary — nothing past this point sees local time.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum TimestampIn {
    Aware(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl TimestampIn {
    fn into_utc(self, offset_minutes: i32) -> DateTime<Utc> {
        match self {
            Self::Aware(dt) => dt.with_timezone(&Utc),
            Self::Naive(naive) => localize_naive(naive, offset_minutes),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    pub cron: String,
    pub next_run: Option<TimestampIn>,
    pub start_date: Option<TimestampIn>,
    pub end_date: Option<TimestampIn>,
}

// ── Handlers ─────────────────────────────────────────────────────

/// POST /tasks — create a task.
///
/// Defaults: `next_run`/`start_date` = now, `end_date` = one year out.
/// A `next_run` at or before now is advanced to the first cron fire after it
/// before insert, so freshly created tasks do not fire retroactively.
pub async fn tasks_create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    takt_schedule::validate(&input.cron).map_err(|e| bad_request(e.to_string()))?;

    let now = Utc::now();
    let offset = state.config.scheduler.local_offset_minutes;

    let mut next_run = input
        .next_run
        .map(|t| t.into_utc(offset))
        .unwrap_or(now);
    let start_date = input
        .start_date
        .map(|t| t.into_utc(offset))
        .unwrap_or(now);
    let end_date = input
        .end_date
        .map(|t| t.into_utc(offset))
        .unwrap_or_else(|| now.checked_add_months(Months::new(12)).unwrap_or(now));

    if start_date > end_date {
        return Err(bad_request(format!(
            "start_date {} is after end_date {}",
            start_date, end_date
        )));
    }

    if next_run <= now {
        next_run =
            takt_schedule::next_fire(&input.cron, next_run).map_err(|e| bad_request(e.to_string()))?;
    }

    let task = state
        .store
        .create(NewTask {
            name: input.name,
            cron: Some(input.cron),
            next_run,
            start_date,
            end_date,
        })
        .await
        .map_err(store_error)?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks — list all tasks, newest first.
pub async fn tasks_list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.store.list().await.map_err(store_error)?;
    Ok(Json(tasks))
}

/// GET /tasks/{id} — fetch a single task.
pub async fn tasks_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state
        .store
        .get(id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| not_found("Task", id))?;
    Ok(Json(task))
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    use takt_queue::MemoryQueue;
    use takt_store::MemoryTaskStore;

    fn test_state() -> Arc<AppState> {
        let mut config = takt_core::Config::for_profile("");
        config.scheduler.local_offset_minutes = 330;
        Arc::new(AppState {
            store: Arc::new(MemoryTaskStore::new()),
            queue: Arc::new(MemoryQueue::new("pending_tasks")),
            config,
        })
    }

    fn request(json: &str) -> CreateTaskRequest {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let state = test_state();
        let before = Utc::now();

        let (status, Json(task)) = tasks_create(
            State(state.clone()),
            Json(request(r#"{"name":"report","cron":"*/5 * * * *"}"#)),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(task.start_date >= before);
        // next_run was advanced off "now" onto a 5-minute boundary.
        assert!(task.next_run > before);
        assert_eq!(task.next_run.minute() % 5, 0);
        // end_date defaults to roughly one year out.
        assert!(task.end_date > before + chrono::Duration::days(360));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_cron() {
        let state = test_state();
        let err = tasks_create(
            State(state),
            Json(request(r#"{"name":"report","cron":"every tuesday"}"#)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_window() {
        let state = test_state();
        let err = tasks_create(
            State(state),
            Json(request(
                r#"{"name":"report","cron":"0 0 * * *",
                    "start_date":"2027-06-01T00:00:00Z",
                    "end_date":"2027-01-01T00:00:00Z"}"#,
            )),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_localizes_naive_timestamps() {
        let state = test_state();
        let (_, Json(task)) = tasks_create(
            State(state),
            Json(request(
                r#"{"name":"report","cron":"0 0 * * *",
                    "start_date":"2099-06-01T05:30:00",
                    "end_date":"2099-12-01T00:00:00Z",
                    "next_run":"2099-06-02T00:00:00Z"}"#,
            )),
        )
        .await
        .unwrap();

        // Naive 05:30 in a +05:30 zone is midnight UTC.
        assert_eq!(task.start_date.to_rfc3339(), "2099-06-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn test_future_next_run_not_advanced() {
        let state = test_state();
        let (_, Json(task)) = tasks_create(
            State(state),
            Json(request(
                r#"{"name":"report","cron":"*/5 * * * *",
                    "next_run":"2099-01-01T00:03:00Z",
                    "end_date":"2099-06-01T00:00:00Z"}"#,
            )),
        )
        .await
        .unwrap();

        // A future next_run is stored as given, even off a cron boundary.
        assert_eq!(task.next_run.to_rfc3339(), "2099-01-01T00:03:00+00:00");
    }

    #[tokio::test]
    async fn test_list_and_get_roundtrip() {
        let state = test_state();
        let (_, Json(created)) = tasks_create(
            State(state.clone()),
            Json(request(r#"{"name":"report","cron":"0 2 * * *"}"#)),
        )
        .await
        .unwrap();

        let Json(tasks) = tasks_list(State(state.clone())).await.unwrap();
        assert_eq!(tasks.len(), 1);

        let Json(fetched) = tasks_get(State(state.clone()), Path(created.id))
            .await
            .unwrap();
        assert_eq!(fetched.id, created.id);

        let err = tasks_get(State(state), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}
