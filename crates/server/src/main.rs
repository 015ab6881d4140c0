//! taktwerk server — task CRUD API plus the background dispatcher.
//!
//! The HTTP surface is plain CRUD; the interesting part is the dispatcher
//! loop spawned at startup, which scans for due tasks every tick and hands
//! occurrences to the dispatch queue. Draining happens in the separate
//! `drain-worker` binary, coupled only through the queue.

mod api;
mod db;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use takt_dispatch::run_dispatcher;
use takt_queue::build_queue;
use takt_store::{MemoryTaskStore, PgTaskStore, TaskStore};

use state::AppState;

fn load_config() -> takt_core::Config {
    takt_core::config::load_dotenv();
    takt_core::Config::from_env()
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/config", get(api::config))
        .route("/queue/status", get(api::queue_status))
        .route("/tasks", get(api::tasks_list).post(api::tasks_create))
        .route("/tasks/{id}", get(api::tasks_get))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = load_config();
    config.log_summary();

    let store: Arc<dyn TaskStore> = match db::init_pg_pool(&config.postgres).await {
        Some(pool) => Arc::new(PgTaskStore::new(pool)),
        None => {
            tracing::warn!("using in-memory task store — tasks will not survive a restart");
            Arc::new(MemoryTaskStore::new())
        }
    };

    let queue = build_queue(&config.queue).await?;

    let dispatch_interval = Duration::from_secs(config.scheduler.dispatch_interval_secs);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = Arc::new(AppState {
        store: store.clone(),
        queue: queue.clone(),
        config,
    });

    // Dispatcher runs in the background — the server starts serving immediately.
    tokio::spawn(run_dispatcher(store, queue, dispatch_interval));

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
