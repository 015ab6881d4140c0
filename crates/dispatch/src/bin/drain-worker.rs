//! drain-worker — consumes pending occurrences from the dispatch queue.
//!
//! Runs in its own process on its own cadence, coupled to the dispatcher
//! only through the queue. The default action logs each occurrence; swap in
//! another [`OccurrenceAction`] where real execution is wired up.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use takt_dispatch::{run_drain_worker, LogAction};
use takt_queue::build_queue;

// ── CLI ─────────────────────────────────────────────────────────────

/// Taktwerk drain worker — pops and processes dispatched occurrences.
#[derive(Parser, Debug)]
#[command(name = "drain-worker", version, about)]
struct Cli {
    /// Seconds between drain passes.
    #[arg(long, env = "DRAIN_INTERVAL_SECS", default_value_t = 5)]
    drain_interval: u64,

    /// Queue backend override ("memory" or "redis"). Defaults to config.
    #[arg(long, env = "QUEUE_BACKEND")]
    queue_backend: Option<String>,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    takt_core::config::load_dotenv();
    let config = takt_core::Config::from_env();

    let mut queue_config = config.queue.clone();
    if let Some(backend) = cli.queue_backend {
        queue_config.backend = backend;
    }

    // A memory queue in a standalone worker drains nothing from the server
    // process; it only makes sense for local smoke runs.
    if queue_config.backend == "memory" {
        tracing::warn!(
            "queue backend is 'memory' — this worker only sees its own queue; \
             use QUEUE_BACKEND=redis to share one with the dispatcher"
        );
    }

    let queue = build_queue(&queue_config).await?;
    let action = Arc::new(LogAction);

    info!(
        channel = %queue_config.channel,
        backend = %queue_config.backend,
        interval = cli.drain_interval,
        "drain-worker starting"
    );

    tokio::select! {
        _ = run_drain_worker(queue, action, Duration::from_secs(cli.drain_interval)) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("drain-worker shutting down");
        }
    }

    Ok(())
}
