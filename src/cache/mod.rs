//! Cache Module
//!
//! In-memory caching with TTL expiration and LRU eviction, plus the keyed
//! wrapper the leaderboard endpoints read through.

mod entry;
mod leaderboard;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use leaderboard::{LeaderboardCache, LeaderboardKind, KEY_NAMESPACE, NO_PARAMS};
pub use lru::LruTracker;
pub use stats::{CacheStats, CacheStatsReport};
pub use store::TtlCache;
