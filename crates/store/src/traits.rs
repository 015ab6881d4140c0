//! Task store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::task::{NewTask, Task};

/// Storage backend for task records.
///
/// Handles are constructed explicitly and injected into the components that
/// need them; implementations cover PostgreSQL ([`crate::PgTaskStore`]) and
/// an in-memory map ([`crate::MemoryTaskStore`]) for tests and degraded mode.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task and return the stored record.
    async fn create(&self, task: NewTask) -> Result<Task, StoreError>;

    /// List all tasks, newest first.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Fetch a single task by id.
    async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Tasks due at `now`: validity window contains `now` and
    /// `next_run <= now`. Read-only; `now` is snapshotted once per cycle by
    /// the caller so every task in a batch is judged against the same instant.
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Task>, StoreError>;

    /// Point update of a task's `next_run`.
    async fn update_next_run(
        &self,
        id: Uuid,
        next_run: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}
