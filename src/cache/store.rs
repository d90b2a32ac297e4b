//! Cache Store Module
//!
//! Bounded key/value store with per-entry TTL, lazy expiry and LRU eviction.
//! Operations never fail: problems are logged and the call degrades to a
//! no-op or a miss.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, CacheStatsReport, LruTracker};
use crate::config::{DEFAULT_MAX_SIZE, DEFAULT_TTL_MS};

// == TTL Cache ==
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
    max_size: usize,
    /// Milliseconds
    default_ttl: u64,
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE, DEFAULT_TTL_MS)
    }
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates a cache holding at most `max_size` entries (minimum 1), with
    /// `default_ttl_ms` applied to writes that don't pass their own TTL.
    pub fn new(max_size: usize, default_ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_size: max_size.max(1),
            default_ttl: default_ttl_ms,
        }
    }

    // == Set ==
    /// Inserts or overwrites `key`.
    ///
    /// A full cache first evicts exactly one entry, the least recently
    /// accessed, even when `key` is already stored.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_ms: Option<u64>) {
        let key = key.into();
        let now = current_timestamp_ms();

        if self.entries.len() >= self.max_size {
            self.evict_one();
        }

        let ttl = ttl_ms.unwrap_or(self.default_ttl);
        self.entries.insert(key.clone(), CacheEntry::new(value, ttl, now));
        self.lru.touch(&key);

        self.stats.record_set();
        self.stats.set_size(self.entries.len());
    }

    // == Get ==
    /// Returns the value if present and unexpired, refreshing its access time.
    ///
    /// An expired entry is removed on the spot and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = current_timestamp_ms();

        let expired = match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                entry.touch(now);
                let value = entry.value.clone();
                self.lru.touch(key);
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("Cache entry '{}' expired on read", key);
            self.remove_entry(key);
        }
        self.stats.record_miss();
        None
    }

    // == Has ==
    /// Existence check with the same expiry rule as [`TtlCache::get`]: an
    /// expired entry is removed and reported absent.
    ///
    /// Leaves access times, LRU order and hit/miss counters alone.
    pub fn has(&mut self, key: &str) -> bool {
        let now = current_timestamp_ms();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => true,
            Some(_) => {
                debug!("Cache entry '{}' expired on existence check", key);
                self.remove_entry(key);
                false
            }
            None => false,
        }
    }

    // == Delete ==
    /// Removes `key`. Returns false if it was not stored.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.remove_entry(key) {
            self.stats.record_delete();
            true
        } else {
            false
        }
    }

    // == Cleanup ==
    /// Removes every expired entry and returns how many were dropped.
    pub fn cleanup(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }

        expired.len()
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_size(0);
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStatsReport {
        self.stats.report(self.max_size)
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Configuration ==
    /// Changes the capacity, evicting LRU entries if the cache is now over it.
    pub fn set_max_size(&mut self, max_size: usize) {
        if max_size == 0 {
            warn!("Cache max size of 0 requested, using 1");
        }
        self.max_size = max_size.max(1);
        while self.entries.len() > self.max_size {
            if !self.evict_one() {
                break;
            }
        }
    }

    pub fn set_default_ttl(&mut self, ttl_ms: u64) {
        self.default_ttl = ttl_ms;
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Stored keys, including expired ones not yet swept.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internals ==
    fn evict_one(&mut self) -> bool {
        match self.lru.evict_oldest() {
            Some(victim) => {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                self.stats.set_size(self.entries.len());
                debug!("Evicted least recently used cache entry '{}'", victim);
                true
            }
            None => {
                warn!(
                    "Cache holds {} entries but has nothing to evict",
                    self.entries.len()
                );
                false
            }
        }
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_size(self.entries.len());
        }
        removed
    }
}
