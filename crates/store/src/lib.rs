pub mod error;
pub mod memory;
pub mod pg;
pub mod task;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryTaskStore;
pub use pg::PgTaskStore;
pub use task::{NewTask, Task};
pub use traits::TaskStore;
