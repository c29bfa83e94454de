//! Request Cache Module
//!
//! TTL-keyed map sitting in front of read requests. Expiry is checked lazily on
//! read; `purge_expired` is the optional housekeeping pass.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == Request Cache ==
/// In-memory TTL cache keyed by request identity.
#[derive(Debug)]
pub struct RequestCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> RequestCache<V> {
    // == Constructor ==
    /// Creates an empty cache reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            clock,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    // == Get ==
    /// Returns the cached value if present and still fresh.
    ///
    /// A stale entry is dropped on the way out and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let value = entry.value().clone();
                self.stats.record_hit();
                Some(value)
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                self.stats.set_total_entries(self.entries.len());
                debug!(key, "cache entry expired");
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or replaces the entry for `key`, fresh for `ttl`.
    ///
    /// A zero TTL stores an entry that is already stale. If the expiry
    /// timestamp cannot be represented the insert is skipped.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let now = self.clock.now_ms();

        match CacheEntry::new(value, now, ttl) {
            Some(entry) => {
                self.entries.insert(key, entry);
                self.stats.set_total_entries(self.entries.len());
            }
            None => {
                warn!(key = %key, ?ttl, "ttl out of range, value not cached");
            }
        }
    }

    // == Invalidate ==
    /// Removes a single entry. Returns whether one was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Removes every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    // == Clear ==
    /// Drops all entries. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Purge Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of stored entries, including stale ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for RequestCache<V> {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn cache_with_clock() -> (RequestCache<String>, ManualClock) {
        let clock = ManualClock::new(10_000);
        (RequestCache::new(Arc::new(clock.clone())), clock)
    }

    #[test]
    fn test_cache_new() {
        let (cache, _) = cache_with_clock();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_set_and_get() {
        let (mut cache, _) = cache_with_clock();

        cache.set("GET /campaigns", "v1".to_string(), Duration::from_secs(1));

        assert_eq!(cache.get("GET /campaigns"), Some("v1".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_get_nonexistent() {
        let (mut cache, _) = cache_with_clock();
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_cache_overwrite_resets_expiry() {
        let (mut cache, clock) = cache_with_clock();

        cache.set("k", "old".to_string(), Duration::from_millis(100));
        clock.advance(Duration::from_millis(80));
        cache.set("k", "new".to_string(), Duration::from_millis(100));
        clock.advance(Duration::from_millis(80));

        assert_eq!(cache.get("k"), Some("new".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_expiry_is_lazy() {
        let (mut cache, clock) = cache_with_clock();

        cache.set("k", "v".to_string(), Duration::from_millis(1_000));
        clock.advance(Duration::from_millis(1_000));

        // Still physically present until read
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);

        let stats = cache.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_cache_zero_ttl_replaces_and_expires() {
        let (mut cache, _) = cache_with_clock();

        cache.set("k", "fresh".to_string(), Duration::from_secs(60));
        cache.set("k", "stale".to_string(), Duration::ZERO);

        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_cache_overflowing_ttl_is_skipped() {
        let (mut cache, clock) = cache_with_clock();
        clock.set(u64::MAX - 1);

        cache.set("k", "v".to_string(), Duration::from_secs(1));

        assert!(cache.is_empty());
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_cache_invalidate_one() {
        let (mut cache, _) = cache_with_clock();

        cache.set("a", "1".to_string(), Duration::from_secs(1));
        cache.set("b", "2".to_string(), Duration::from_secs(1));

        assert!(cache.invalidate("a"));
        assert!(!cache.invalidate("a"));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some("2".to_string()));
    }

    #[test]
    fn test_cache_invalidate_prefix() {
        let (mut cache, _) = cache_with_clock();

        cache.set("campaigns:list?page=1", "1".to_string(), Duration::from_secs(1));
        cache.set("campaigns:7", "2".to_string(), Duration::from_secs(1));
        cache.set("users:7", "3".to_string(), Duration::from_secs(1));

        assert_eq!(cache.invalidate_prefix("campaigns:"), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("users:7"), Some("3".to_string()));
    }

    #[test]
    fn test_cache_clear() {
        let (mut cache, _) = cache_with_clock();

        cache.set("a", "1".to_string(), Duration::from_secs(1));
        cache.set("b", "2".to_string(), Duration::from_secs(1));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_cache_purge_expired() {
        let (mut cache, clock) = cache_with_clock();

        cache.set("short", "1".to_string(), Duration::from_millis(100));
        cache.set("long", "2".to_string(), Duration::from_secs(10));
        clock.advance(Duration::from_millis(150));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("long"), Some("2".to_string()));
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_cache_stats() {
        let (mut cache, _) = cache_with_clock();

        cache.set("k", "v".to_string(), Duration::from_secs(1));
        cache.get("k");
        cache.get("nope");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
