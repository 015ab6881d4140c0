pub mod error;
pub mod memory;
pub mod queue;
pub mod redis;

pub use error::QueueError;
pub use memory::MemoryQueue;
pub use queue::{build_queue, DispatchQueue, QueueHealth};
pub use self::redis::RedisQueue;
