//! Periodic loops driving the dispatch and drain passes.
//!
//! Two independent cadences, typically in separate processes: the dispatcher
//! runs in the API server, the drain worker in its own binary. Neither loop
//! guards against an overrunning previous cycle — a slow cycle can overlap
//! the next one, which at worst re-dispatches a task (at-least-once).

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use takt_queue::DispatchQueue;
use takt_store::TaskStore;

use crate::action::OccurrenceAction;
use crate::cycle::run_dispatch_cycle;
use crate::drain::{drain_once, DrainStatus};

/// Run the detect-and-dispatch loop forever.
///
/// Each tick snapshots `now` once and runs a full cycle against it. A failed
/// cycle (store unreachable) is logged and retried on the next tick.
pub async fn run_dispatcher(
    store: Arc<dyn TaskStore>,
    queue: Arc<dyn DispatchQueue>,
    interval: Duration,
) {
    info!("dispatcher started (poll interval: {}s)", interval.as_secs());

    loop {
        tokio::time::sleep(interval).await;

        let now = Utc::now();
        match run_dispatch_cycle(store.as_ref(), queue.as_ref(), now).await {
            Ok(stats) if stats.due > 0 => {
                info!(
                    due = stats.due,
                    dispatched = stats.dispatched,
                    skipped = stats.skipped,
                    "dispatch cycle complete"
                );
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "dispatch cycle failed — retrying next tick");
            }
        }
    }
}

/// Run the drain loop forever.
///
/// Each tick empties the backlog present at that moment and reports counts.
pub async fn run_drain_worker(
    queue: Arc<dyn DispatchQueue>,
    action: Arc<dyn OccurrenceAction>,
    interval: Duration,
) {
    info!("drain worker started (poll interval: {}s)", interval.as_secs());

    loop {
        tokio::time::sleep(interval).await;

        let summary = drain_once(queue.as_ref(), action.as_ref()).await;
        match summary.status {
            DrainStatus::Success => {
                info!(processed = summary.processed, "processed pending occurrences");
            }
            DrainStatus::NoTasks => {}
            DrainStatus::Error => {
                warn!(
                    processed = summary.processed,
                    "drain pass failed — retrying next tick"
                );
            }
        }
    }
}
