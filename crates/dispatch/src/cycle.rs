//! One detect-and-dispatch pass over the task store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use takt_queue::DispatchQueue;
use takt_schedule::{next_fire_of, parse_schedule};
use takt_store::{StoreError, Task, TaskStore};

use crate::occurrence::Occurrence;

/// Counters for a single dispatch cycle.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct CycleStats {
    /// Tasks the scanner returned as due.
    pub due: usize,
    /// Occurrences that reached the queue.
    pub dispatched: usize,
    /// Due tasks skipped on a per-task failure.
    pub skipped: usize,
}

/// Run one dispatch cycle against a snapshot instant `now`.
///
/// For each due task: parse its schedule, push the occurrence onto the
/// queue, then advance `next_run` in the store. A failure on one task never
/// aborts the batch; only a scanner failure does (the caller retries on the
/// next tick). A task whose push landed but whose store update failed stays
/// due and is re-dispatched next cycle — consumers tolerate duplicates.
pub async fn run_dispatch_cycle(
    store: &dyn TaskStore,
    queue: &dyn DispatchQueue,
    now: DateTime<Utc>,
) -> Result<CycleStats, StoreError> {
    let due_tasks = store.find_due(now).await?;

    let mut stats = CycleStats {
        due: due_tasks.len(),
        ..CycleStats::default()
    };

    for task in due_tasks {
        if dispatch_task(store, queue, &task).await {
            stats.dispatched += 1;
        } else {
            stats.skipped += 1;
        }
    }

    Ok(stats)
}

/// Dispatch a single due task. Returns whether the occurrence reached the
/// queue.
async fn dispatch_task(
    store: &dyn TaskStore,
    queue: &dyn DispatchQueue,
    task: &Task,
) -> bool {
    // Parse up front: a task with an unparseable expression is skipped whole
    // for this cycle — not pushed, not advanced — and retried next cycle.
    let schedule = match &task.cron {
        Some(expr) => match parse_schedule(expr) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(
                    task_id = %task.id,
                    task_name = %task.name,
                    error = %e,
                    "invalid cron expression — skipping"
                );
                return false;
            }
        },
        None => None,
    };

    let body = match Occurrence::from_task(task).to_json() {
        Ok(body) => body,
        Err(e) => {
            warn!(
                task_id = %task.id,
                task_name = %task.name,
                error = %e,
                "failed to serialize occurrence — skipping"
            );
            return false;
        }
    };

    if let Err(e) = queue.push(body).await {
        warn!(
            task_id = %task.id,
            task_name = %task.name,
            error = %e,
            "queue push failed — skipping"
        );
        return false;
    }

    debug!(task_id = %task.id, task_name = %task.name, "occurrence enqueued");

    // Advance only after the push has landed. The reverse order could lose a
    // firing outright; this order at worst re-dispatches one.
    if let Some(schedule) = schedule {
        match next_fire_of(&schedule, task.next_run) {
            Some(next_run) => {
                if let Err(e) = store.update_next_run(task.id, next_run).await {
                    warn!(
                        task_id = %task.id,
                        error = %e,
                        "failed to advance next_run — task will re-dispatch next cycle"
                    );
                }
            }
            None => {
                warn!(
                    task_id = %task.id,
                    task_name = %task.name,
                    "schedule has no future fire time — next_run left unchanged"
                );
            }
        }
    }

    true
}

// ── Tests ────────────────────────────────────────────────────────────
