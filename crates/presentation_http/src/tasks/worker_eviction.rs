//! Worker TTL eviction task
//!
//! Periodically removes workers whose last heartbeat is older than the
//! configured TTL.

use std::sync::Arc;

use application::WorkerRegistry;
use chrono::{TimeDelta, Utc};
use infrastructure::WorkerConfig;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Spawn a background task that periodically evicts stale workers.
///
/// Returns `None` when eviction is disabled (`ttl_secs = 0`). The returned
/// `JoinHandle` can be used to abort the task when shutting down.
///
/// # Example
///
/// ```ignore
/// let eviction = spawn_worker_eviction_task(Arc::clone(&state.workers), &config.workers);
///
/// // On shutdown:
/// if let Some(handle) = eviction {
///     handle.abort();
/// }
/// ```
pub fn spawn_worker_eviction_task(
    workers: Arc<WorkerRegistry>,
    config: &WorkerConfig,
) -> Option<JoinHandle<()>> {
    let Some(ttl) = config.ttl() else {
        info!("Worker eviction disabled");
        return None;
    };
    let Some(ttl) = i64::try_from(ttl.as_secs())
        .ok()
        .and_then(TimeDelta::try_seconds)
    else {
        warn!(ttl_secs = config.ttl_secs, "Worker TTL out of range, eviction disabled");
        return None;
    };
    let interval = config.eviction_interval();

    info!(
        ttl_secs = config.ttl_secs,
        interval_secs = interval.as_secs(),
        "Starting worker eviction task"
    );

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = workers.evict_stale(ttl, Utc::now());
            if removed == 0 {
                debug!(remaining = workers.len(), "No stale workers");
            }
        }
    }))
}
