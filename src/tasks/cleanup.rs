//! Cache Cleanup Task
//!
//! Background task that periodically purges expired request cache entries.
//! Reads already skip stale entries, so this only bounds memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a task that purges expired entries every `interval`.
///
/// The returned handle should be aborted on shutdown.
///
/// # Example
/// ```ignore
/// let client = ApiClient::from_config(&config)?;
/// let cleanup_handle = spawn_cleanup_task(client.cache(), Duration::from_secs(30));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?interval, "starting cache cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.purge_expired();

            if removed > 0 {
                info!("cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("cache cleanup: no expired entries found");
            }
        }
    })
}
