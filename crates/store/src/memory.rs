//! In-memory task store.
//!
//! Used by tests and as the degraded-mode fallback when PostgreSQL is not
//! configured — the server still runs, tasks just do not survive a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::task::{NewTask, Task};
use crate::traits::TaskStore;

#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        task.validate().map_err(StoreError::Invalid)?;

        let now = Utc::now();
        let stored = Task {
            id: Uuid::new_v4(),
            name: task.name,
            cron: task.cron,
            next_run: task.next_run,
            start_date: task.start_date,
            end_date: task.end_date,
            created_at: now,
            updated_at: now,
        };
        self.tasks.write().await.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Task>, StoreError> {
        let tasks = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.start_date <= now && t.end_date >= now && t.next_run <= now)
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn update_next_run(
        &self,
        id: Uuid,
        next_run: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        task.next_run = next_run;
        task.updated_at = Utc::now();
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
