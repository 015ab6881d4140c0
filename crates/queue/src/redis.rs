//! Redis list-backed queue (requires the `queue-redis` Cargo feature).
//!
//! Wire layout: `LPUSH` onto the channel key, `RPOP` to consume — FIFO
//! through the list, and `RPOP` is atomic so each item reaches at most one
//! consumer. Compatible with other producers/consumers sharing the same
//! channel key.

#[cfg(feature = "queue-redis")]
mod backend {
    use async_trait::async_trait;
    use redis::aio::MultiplexedConnection;
    use redis::AsyncCommands;
    use tracing::info;

    use crate::error::QueueError;
    use crate::queue::{DispatchQueue, QueueHealth};

    #[derive(Debug)]
    pub struct RedisQueue {
        conn: MultiplexedConnection,
        channel: String,
    }

    impl RedisQueue {
        /// Open a connection to the Redis server and bind to a channel key.
        pub async fn connect(url: &str, channel: &str) -> Result<Self, QueueError> {
            let client = redis::Client::open(url)
                .map_err(|e| QueueError::Connection(format!("invalid redis url: {e}")))?;
            let conn = client
                .get_multiplexed_async_connection()
                .await
                .map_err(|e| QueueError::Connection(format!("redis connect failed: {e}")))?;

            info!(channel = %channel, "redis queue connected");

            Ok(Self {
                conn,
                channel: channel.to_string(),
            })
        }
    }

    #[async_trait]
    impl DispatchQueue for RedisQueue {
        async fn push(&self, body: String) -> Result<(), QueueError> {
            let mut conn = self.conn.clone();
            conn.lpush::<_, _, ()>(&self.channel, body)
                .await
                .map_err(|e| QueueError::Provider(format!("redis LPUSH failed: {e}")))?;
            Ok(())
        }

        async fn pop(&self) -> Result<Option<String>, QueueError> {
            let mut conn = self.conn.clone();
            let body: Option<String> = conn
                .rpop(&self.channel, None)
                .await
                .map_err(|e| QueueError::Provider(format!("redis RPOP failed: {e}")))?;
            Ok(body)
        }

        async fn depth(&self) -> Result<u64, QueueError> {
            let mut conn = self.conn.clone();
            let len: u64 = conn
                .llen(&self.channel)
                .await
                .map_err(|e| QueueError::Provider(format!("redis LLEN failed: {e}")))?;
            Ok(len)
        }

        async fn health(&self) -> Result<QueueHealth, QueueError> {
            Ok(QueueHealth {
                connected: true,
                approximate_message_count: Some(self.depth().await?),
                provider: "redis".to_string(),
            })
        }
    }
}

#[cfg(not(feature = "queue-redis"))]
mod backend {
    use async_trait::async_trait;

    use crate::error::QueueError;
    use crate::queue::{DispatchQueue, QueueHealth};

    #[derive(Debug)]
    pub struct RedisQueue;

    impl RedisQueue {
        pub async fn connect(_url: &str, _channel: &str) -> Result<Self, QueueError> {
            Err(QueueError::Provider(
                "Redis queue backend requires the 'queue-redis' Cargo feature".to_string(),
            ))
        }
    }

    #[async_trait]
    impl DispatchQueue for RedisQueue {
        async fn push(&self, _body: String) -> Result<(), QueueError> {
            Err(QueueError::Provider(
                "Redis queue backend requires the 'queue-redis' Cargo feature".to_string(),
            ))
        }

        async fn pop(&self) -> Result<Option<String>, QueueError> {
            Err(QueueError::Provider(
                "Redis queue backend requires the 'queue-redis' Cargo feature".to_string(),
            ))
        }

        async fn depth(&self) -> Result<u64, QueueError> {
            Err(QueueError::Provider(
                "Redis queue backend requires the 'queue-redis' Cargo feature".to_string(),
            ))
        }

        async fn health(&self) -> Result<QueueHealth, QueueError> {
            Err(QueueError::Provider(
                "Redis queue backend requires the 'queue-redis' Cargo feature".to_string(),
            ))
        }
    }
}

pub use backend::RedisQueue;
