//! Cache Module
//!
//! In-memory request cache with TTL expiration and an injectable clock.

mod clock;
mod entry;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::RequestCache;

/// Cache of decoded JSON response bodies shared between the client, the
/// resource stores and the cleanup task.
pub type SharedCache = Arc<RwLock<RequestCache<serde_json::Value>>>;

/// Wraps a fresh cache for sharing.
pub fn shared(cache: RequestCache<serde_json::Value>) -> SharedCache {
    Arc::new(RwLock::new(cache))
}
