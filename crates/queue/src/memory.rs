//! In-process FIFO queue.
//!
//! Default backend for single-process deployments and tests. The mutex makes
//! each pop atomic, so an item is handed to at most one consumer.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::QueueError;
use crate::queue::{DispatchQueue, QueueHealth};

#[derive(Debug)]
pub struct MemoryQueue {
    channel: String,
    items: Mutex<VecDeque<String>>,
}

impl MemoryQueue {
    pub fn new(channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            items: Mutex::new(VecDeque::new()),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

#[async_trait]
impl DispatchQueue for MemoryQueue {
    async fn push(&self, body: String) -> Result<(), QueueError> {
        self.items.lock().await.push_back(body);
        Ok(())
    }

    async fn pop(&self) -> Result<Option<String>, QueueError> {
        Ok(self.items.lock().await.pop_front())
    }

    async fn depth(&self) -> Result<u64, QueueError> {
        Ok(self.items.lock().await.len() as u64)
    }

    async fn health(&self) -> Result<QueueHealth, QueueError> {
        Ok(QueueHealth {
            connected: true,
            approximate_message_count: Some(self.depth().await?),
            provider: "memory".to_string(),
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────
