//! PostgreSQL-backed task store.
//!
//! Plain runtime SQL via `sqlx::query_as` against the `tasks` table created
//! by the workspace migrations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::task::{NewTask, Task};
use crate::traits::TaskStore;

/// Task store backed by a PostgreSQL connection pool.
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        task.validate().map_err(StoreError::Invalid)?;

        let row = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (name, cron, next_run, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, cron, next_run, start_date, end_date,
                       created_at, updated_at",
        )
        .bind(&task.name)
        .bind(&task.cron)
        .bind(task.next_run)
        .bind(task.start_date)
        .bind(task.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let rows = sqlx::query_as::<_, Task>(
            "SELECT id, name, cron, next_run, start_date, end_date,
                    created_at, updated_at
             FROM tasks
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let row = sqlx::query_as::<_, Task>(
            "SELECT id, name, cron, next_run, start_date, end_date,
                    created_at, updated_at
             FROM tasks
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Task>, StoreError> {
        let rows = sqlx::query_as::<_, Task>(
            "SELECT id, name, cron, next_run, start_date, end_date,
                    created_at, updated_at
             FROM tasks
             WHERE start_date <= $1
               AND end_date >= $1
               AND next_run <= $1",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update_next_run(
        &self,
        id: Uuid,
        next_run: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE tasks SET next_run = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(next_run)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}
