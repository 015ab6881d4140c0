//! Dispatch queue trait and backend selection.
//!
//! The queue is the only coupling between the dispatcher and the drain
//! worker: an ordered, at-least-once FIFO channel of serialized occurrences.
//! Backends are selected at runtime from [`QueueConfig`]; the Redis backend
//! is gated behind the `queue-redis` Cargo feature so the client library is
//! only pulled in when opted into.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use takt_core::config::QueueConfig;

use crate::error::QueueError;
use crate::memory::MemoryQueue;
use crate::redis::RedisQueue;

/// Health status of a queue connection.
#[derive(Debug, Clone, Serialize)]
pub struct QueueHealth {
    /// Whether the queue is reachable.
    pub connected: bool,
    /// Approximate number of messages waiting in the queue.
    pub approximate_message_count: Option<u64>,
    /// Queue provider name ("memory", "redis").
    pub provider: String,
}

impl fmt::Display for QueueHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QueueHealth {{ connected: {}, messages: {:?}, provider: {} }}",
            self.connected, self.approximate_message_count, self.provider
        )
    }
}

/// Trait for dispatch queue backends.
///
/// Push order is preserved as pop order (strict FIFO), and each pushed item
/// is returned by at most one `pop` call even with concurrent consumers.
/// Capacity is unbounded — there is no backpressure signal to the producer.
#[async_trait]
pub trait DispatchQueue: Send + Sync + fmt::Debug {
    /// Append a serialized occurrence to the tail of the channel.
    async fn push(&self, body: String) -> Result<(), QueueError>;

    /// Atomically remove and return the head, or `None` when empty.
    /// Never blocks waiting for new items.
    async fn pop(&self) -> Result<Option<String>, QueueError>;

    /// Number of items currently waiting.
    async fn depth(&self) -> Result<u64, QueueError>;

    /// Check connectivity and return health status.
    async fn health(&self) -> Result<QueueHealth, QueueError>;
}

/// Build the appropriate [`DispatchQueue`] from a [`QueueConfig`].
///
/// Returns an error if the requested backend is unknown or its Cargo feature
/// is not enabled.
pub async fn build_queue(config: &QueueConfig) -> Result<Arc<dyn DispatchQueue>, QueueError> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryQueue::new(&config.channel))),
        "redis" => Ok(Arc::new(
            RedisQueue::connect(&config.redis_url, &config.channel).await?,
        )),
        other => Err(QueueError::Provider(format!(
            "unknown queue backend '{}' — supported: memory, redis",
            other
        ))),
    }
}

// ── Tests ────────────────────────────────────────────────────────────
