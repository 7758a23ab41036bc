//! Stats Snapshot Task
//!
//! Periodically logs a read-only snapshot of the cache store. Purely
//! observational: takes a read lock, never mutates.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::CacheStore;

/// Spawns a background task that logs store occupancy and hit rate
/// every `interval`.
pub fn spawn_stats_task<V>(
    cache: Arc<RwLock<CacheStore<V>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.read().await.stats();
            info!(
                size = stats.size,
                hits = stats.counters.hits,
                misses = stats.counters.misses,
                evictions = stats.counters.evictions,
                hit_rate = stats.counters.hit_rate(),
                "cache stats snapshot"
            );
        }
    })
}
