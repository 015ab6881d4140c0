//! Drain pass: empty the dispatch queue and run the action per item.

use serde::Serialize;
use tracing::{info, warn};

use takt_queue::DispatchQueue;

use crate::action::OccurrenceAction;
use crate::occurrence::Occurrence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainStatus {
    NoTasks,
    Success,
    Error,
}

/// Result of one drain pass.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DrainSummary {
    pub status: DrainStatus,
    pub processed: u64,
}

/// Pop the queue until empty, running `action` once per occurrence.
///
/// Malformed items are logged and skipped without aborting the pass; an
/// action failure is logged but the item still counts as processed — popped
/// items cannot be requeued. A queue-access failure ends the pass with an
/// error summary; the remaining backlog is picked up on the next invocation.
/// Items pushed while the pass runs are not guaranteed to be seen by it.
pub async fn drain_once(
    queue: &dyn DispatchQueue,
    action: &dyn OccurrenceAction,
) -> DrainSummary {
    let backlog = match queue.depth().await {
        Ok(0) => {
            return DrainSummary {
                status: DrainStatus::NoTasks,
                processed: 0,
            };
        }
        Ok(n) => n,
        Err(e) => {
            warn!(error = %e, "queue depth check failed");
            return DrainSummary {
                status: DrainStatus::Error,
                processed: 0,
            };
        }
    };

    info!(backlog = backlog, "draining pending occurrences");

    let mut processed: u64 = 0;

    loop {
        let body = match queue.pop().await {
            Ok(Some(body)) => body,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, processed = processed, "queue pop failed — aborting drain");
                return DrainSummary {
                    status: DrainStatus::Error,
                    processed,
                };
            }
        };

        let occurrence = match Occurrence::from_json(&body) {
            Ok(occ) => occ,
            Err(e) => {
                warn!(error = %e, "skipping malformed queue item");
                continue;
            }
        };

        if let Err(e) = action.execute(&occurrence).await {
            warn!(
                task_id = %occurrence.id,
                task_name = %occurrence.name,
                error = %e,
                "occurrence action failed"
            );
        }
        processed += 1;
    }

    info!(processed = processed, "drain pass complete");

    DrainSummary {
        status: DrainStatus::Success,
        processed,
    }
}

// ── Tests ────────────────────────────────────────────────────────────
