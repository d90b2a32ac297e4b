//! Cache Entry Module
//!
//! A stored value with its expiry and access timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cache entry. All timestamps are Unix milliseconds.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant after which the entry no longer counts as present
    pub expiry: u64,
    /// When the entry was written
    pub created: u64,
    /// Last successful read (or the write, if never read)
    pub accessed: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry written at `now` that lives for `ttl_ms`.
    pub fn new(value: V, ttl_ms: u64, now: u64) -> Self {
        Self {
            value,
            expiry: now.saturating_add(ttl_ms),
            created: now,
            accessed: now,
        }
    }

    // == Is Expired ==
    /// An entry expires once `now` is strictly past its expiry.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now > self.expiry
    }

    // == Touch ==
    /// Records a read at `now`.
    pub fn touch(&mut self, now: u64) {
        self.accessed = now;
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
