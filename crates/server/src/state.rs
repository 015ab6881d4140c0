use std::sync::Arc;

use takt_queue::DispatchQueue;
use takt_store::TaskStore;

pub struct AppState {
    pub store: Arc<dyn TaskStore>,
    pub queue: Arc<dyn DispatchQueue>,
    pub config: takt_core::Config,
}
