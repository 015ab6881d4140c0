//! The queue message for one scheduled firing of a task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use takt_store::Task;

/// One scheduled firing of a task, captured at detection time.
///
/// Immutable once enqueued, and self-contained: the consumer acts on it
/// without re-reading the task store. `next_run` is the task's scheduled
/// fire instant as it stood when the occurrence was built — the store's copy
/// advances right after the push, this one does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_run: Option<DateTime<Utc>>,
}

impl Occurrence {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.name.clone(),
            cron: task.cron.clone(),
            next_run: Some(task.next_run),
        }
    }

    /// The instant this occurrence was scheduled for.
    pub fn scheduled_for(&self) -> Option<DateTime<Utc>> {
        self.next_run
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
