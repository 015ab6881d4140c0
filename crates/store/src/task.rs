//! The recurring-task record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring job definition.
///
/// `next_run` is the only field the dispatch pipeline mutates — exactly once
/// per dispatched occurrence. `start_date`/`end_date` bound the task's active
/// window (`start_date <= end_date` always holds for stored records).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    /// 5-field cron expression. Absent for tasks created without a schedule;
    /// such tasks are dispatched but never advanced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    pub next_run: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a task. Defaults and timezone localization are
/// resolved by the caller before this reaches a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    pub cron: Option<String>,
    pub next_run: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl NewTask {
    /// Check invariants a store refuses to persist without.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.start_date > self.end_date {
            return Err(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            ));
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> NewTask {
        let t = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        NewTask {
            name: "report".to_string(),
            cron: Some("*/5 * * * *".to_string()),
            next_run: t,
            start_date: t,
            end_date: t + chrono::Duration::days(365),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let mut task = base();
        task.name = "   ".to_string();
        assert!(task.validate().unwrap_err().contains("name"));
    }

    #[test]
    fn test_validate_inverted_window() {
        let mut task = base();
        task.end_date = task.start_date - chrono::Duration::seconds(1);
        assert!(task.validate().unwrap_err().contains("end_date"));
    }

    #[test]
    fn test_task_serializes_without_cron_when_absent() {
        let t = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let task = Task {
            id: Uuid::new_v4(),
            name: "one-shot".to_string(),
            cron: None,
            next_run: t,
            start_date: t,
            end_date: t,
            created_at: t,
            updated_at: t,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("cron"));
    }
}
