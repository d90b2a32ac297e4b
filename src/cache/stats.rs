//! Cache Statistics Module
//!
//! Process-lifetime counters plus the derived report served over HTTP.

use serde::Serialize;

// == Cache Stats ==
/// Raw counters. Everything except `size` only grows until [`CacheStats::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub evictions: u64,
    /// Current number of stored entries
    pub size: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Zeroes the counters, keeping the size gauge.
    pub fn reset(&mut self) {
        *self = Self {
            size: self.size,
            ..Self::default()
        };
    }

    /// Adds the derived percentages for a cache bounded at `max_size`.
    pub fn report(&self, max_size: usize) -> CacheStatsReport {
        let hit_rate = if self.hits + self.misses == 0 {
            "0%".to_string()
        } else {
            percentage(self.hit_rate())
        };
        let utilization = if max_size == 0 {
            "0%".to_string()
        } else {
            percentage(self.size as f64 / max_size as f64)
        };

        CacheStatsReport {
            hits: self.hits,
            misses: self.misses,
            sets: self.sets,
            deletes: self.deletes,
            evictions: self.evictions,
            size: self.size,
            max_size,
            hit_rate,
            utilization,
        }
    }
}

fn percentage(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

// == Cache Stats Report ==
/// Counters plus `hit_rate` and `utilization` as percentage strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatsReport {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub evictions: u64,
    pub size: usize,
    pub max_size: usize,
    pub hit_rate: String,
    pub utilization: String,
}
