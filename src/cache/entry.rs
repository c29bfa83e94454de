//! Cache Entry Module
//!
//! Defines the immutable snapshot stored for each cached request.

use std::time::Duration;

// == Cache Entry ==
/// A cached value and the window during which it may be served.
///
/// Entries are never mutated; refreshing a key replaces its entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    value: V,
    /// Insertion timestamp (Unix milliseconds)
    created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry inserted at `now_ms` that stays fresh for `ttl`.
    ///
    /// Returns `None` when `now_ms + ttl` does not fit in a u64 timestamp.
    pub fn new(value: V, now_ms: u64, ttl: Duration) -> Option<Self> {
        let ttl_ms = u64::try_from(ttl.as_millis()).ok()?;
        let expires_at = now_ms.checked_add(ttl_ms)?;

        Some(Self {
            value,
            created_at: now_ms,
            expires_at,
        })
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn expires_at(&self) -> u64 {
        self.expires_at
    }

    // == Is Expired ==
    /// An entry is visible only while `now < expires_at`, so it is already
    /// stale at the exact expiry instant.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining freshness, zero once expired.
    pub fn ttl_remaining(&self, now_ms: u64) -> Duration {
        Duration::from_millis(self.expires_at.saturating_sub(now_ms))
    }
}
