//! Pluggable per-occurrence consumer action.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::occurrence::Occurrence;

/// What an action reports back for one occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct ActionReceipt {
    pub id: String,
    pub name: String,
}

/// Invoked once per drained occurrence.
///
/// Delivery is at-least-once and fire-and-forget: an occurrence may arrive
/// more than once, and a failing action is logged but never requeued.
/// Implementations must be safe to call for duplicate occurrences.
#[async_trait]
pub trait OccurrenceAction: Send + Sync {
    async fn execute(&self, occurrence: &Occurrence) -> anyhow::Result<ActionReceipt>;
}

/// Default action: log the occurrence.
pub struct LogAction;

#[async_trait]
impl OccurrenceAction for LogAction {
    async fn execute(&self, occurrence: &Occurrence) -> anyhow::Result<ActionReceipt> {
        info!(
            task_id = %occurrence.id,
            task_name = %occurrence.name,
            scheduled_for = ?occurrence.scheduled_for(),
            "processing occurrence"
        );
        Ok(ActionReceipt {
            id: occurrence.id.clone(),
            name: occurrence.name.clone(),
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────
