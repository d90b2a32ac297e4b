//! Leaderboard Cache Module
//!
//! Keyed cache-aside wrapper over a shared [`TtlCache`]. Each leaderboard query
//! is identified by its kind and its parameters.

use std::fmt::{self, Display};
use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::TtlCache;
use crate::error::{Result, TimelineError};

/// Namespace shared by every leaderboard key.
pub const KEY_NAMESPACE: &str = "leaderboard:";

/// Empty parameter list for queries without parameters.
pub const NO_PARAMS: &[(&str, &str)] = &[];

// == Leaderboard Kind ==
/// The registered leaderboard types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderboardKind {
    Global,
    Category,
    Daily,
    Weekly,
    Player,
    Summary,
}

impl LeaderboardKind {
    pub const ALL: [LeaderboardKind; 6] = [
        LeaderboardKind::Global,
        LeaderboardKind::Category,
        LeaderboardKind::Daily,
        LeaderboardKind::Weekly,
        LeaderboardKind::Player,
        LeaderboardKind::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardKind::Global => "global",
            LeaderboardKind::Category => "category",
            LeaderboardKind::Daily => "daily",
            LeaderboardKind::Weekly => "weekly",
            LeaderboardKind::Player => "player",
            LeaderboardKind::Summary => "summary",
        }
    }

    /// Key prefix, e.g. `leaderboard:global`.
    pub fn prefix(&self) -> String {
        format!("{}{}", KEY_NAMESPACE, self.as_str())
    }
}

impl Display for LeaderboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardKind {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TimelineError::InvalidLeaderboardType(s.to_string()))
    }
}

// == Leaderboard Cache ==
/// Cloneable handle; all clones share one underlying cache.
#[derive(Debug)]
pub struct LeaderboardCache<V> {
    cache: Arc<RwLock<TtlCache<V>>>,
    /// Bumped by every invalidation, under the cache write lock
    generation: Arc<AtomicU64>,
}

impl<V> Clone for LeaderboardCache<V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<V: Clone> LeaderboardCache<V> {
    pub fn new(cache: Arc<RwLock<TtlCache<V>>>) -> Self {
        Self {
            cache,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The shared store, for stats and the cleanup task.
    pub fn store(&self) -> Arc<RwLock<TtlCache<V>>> {
        Arc::clone(&self.cache)
    }

    // == Generate Key ==
    /// Builds `<prefix>:<k1>=<v1>:<k2>=<v2>` with params sorted by name, so
    /// the order callers list them in does not matter.
    ///
    /// Fails with [`TimelineError::InvalidLeaderboardType`] for unknown kinds.
    pub fn generate_key<K, P>(kind: &str, params: &[(K, P)]) -> Result<String>
    where
        K: AsRef<str>,
        P: Display,
    {
        let kind: LeaderboardKind = kind.parse()?;

        let mut pairs: Vec<(&str, String)> = params
            .iter()
            .map(|(name, value)| (name.as_ref(), value.to_string()))
            .collect();
        pairs.sort();

        let params = pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(":");

        Ok(format!("{}:{}", kind.prefix(), params))
    }

    // == Get Or Fetch ==
    /// Returns the cached value for the query, or runs `fetch`, caches its
    /// result for `ttl_ms` (the store default if `None`) and returns it.
    ///
    /// The lock is not held while `fetch` runs, so concurrent misses on the
    /// same key each run their own fetch. Fetch errors are returned and
    /// nothing is cached. A result fetched across an invalidation is returned
    /// but not cached, since it may predate the write that invalidated.
    pub async fn get_or_fetch<K, P, F, Fut>(
        &self,
        kind: &str,
        params: &[(K, P)],
        ttl_ms: Option<u64>,
        fetch: F,
    ) -> Result<V>
    where
        K: AsRef<str>,
        P: Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let key = Self::generate_key(kind, params)?;

        let started = {
            let mut cache = self.cache.write().await;
            if let Some(value) = cache.get(&key) {
                debug!("Leaderboard cache hit for '{}'", key);
                return Ok(value);
            }
            self.generation.load(Ordering::Acquire)
        };

        debug!("Leaderboard cache miss for '{}', fetching", key);
        let value = fetch().await?;

        let mut cache = self.cache.write().await;
        if self.generation.load(Ordering::Acquire) == started {
            cache.set(key, value.clone(), ttl_ms);
        } else {
            debug!("Leaderboard '{}' invalidated during fetch, not caching", key);
        }
        Ok(value)
    }

    // == Invalidate ==
    /// Drops one cached query. Returns whether it was cached.
    pub async fn invalidate<K, P>(&self, kind: &str, params: &[(K, P)]) -> Result<bool>
    where
        K: AsRef<str>,
        P: Display,
    {
        let key = Self::generate_key(kind, params)?;
        let mut cache = self.cache.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(cache.delete(&key))
    }

    /// Drops every key in the leaderboard namespace and returns the count.
    pub async fn invalidate_all(&self) -> usize {
        let mut cache = self.cache.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        let mut removed = 0;
        for key in cache.keys() {
            if key.starts_with(KEY_NAMESPACE) && cache.delete(&key) {
                removed += 1;
            }
        }
        debug!("Invalidated {} leaderboard cache entries", removed);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn new_cache() -> LeaderboardCache<String> {
        LeaderboardCache::new(Arc::new(RwLock::new(TtlCache::new(100, 60_000))))
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("global".parse::<LeaderboardKind>().unwrap(), LeaderboardKind::Global);
        assert_eq!("summary".parse::<LeaderboardKind>().unwrap(), LeaderboardKind::Summary);
        assert!("Global".parse::<LeaderboardKind>().is_err());
    }

    #[test]
    fn test_every_kind_has_namespaced_prefix() {
        for kind in LeaderboardKind::ALL {
            assert!(kind.prefix().starts_with(KEY_NAMESPACE));
            assert!(kind.prefix().ends_with(kind.as_str()));
        }
    }

    #[test]
    fn test_generate_key_format() {
        let params = [("limit", "10"), ("category", "war")];
        let key = LeaderboardCache::<String>::generate_key("category", &params).unwrap();
        assert_eq!(key, "leaderboard:category:category=war:limit=10");
    }

    #[test]
    fn test_generate_key_without_params() {
        let key = LeaderboardCache::<String>::generate_key("summary", NO_PARAMS).unwrap();
        assert_eq!(key, "leaderboard:summary:");
    }

    #[test]
    fn test_generate_key_order_independent() {
        let a = LeaderboardCache::<String>::generate_key("global", &[("a", 1), ("b", 2)]).unwrap();
        let b = LeaderboardCache::<String>::generate_key("global", &[("b", 2), ("a", 1)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_key_invalid_type() {
        let err = LeaderboardCache::<String>::generate_key("monthly", NO_PARAMS).unwrap_err();
        assert!(matches!(err, TimelineError::InvalidLeaderboardType(_)));
        assert_eq!(err.to_string(), "Invalid leaderboard type: monthly");
    }

    #[tokio::test]
    async fn test_get_or_fetch_caches_result() {
        let cache = new_cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_fetch("global", &[("limit", 10)], None, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("top ten".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "top ten");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.store().read().await.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_get_or_fetch_distinct_params() {
        let cache = new_cache();
        let calls = AtomicUsize::new(0);

        for limit in [10, 20] {
            cache
                .get_or_fetch("global", &[("limit", limit)], None, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(format!("top {limit}"))
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_or_fetch_error_not_cached() {
        let cache = new_cache();

        let result = cache
            .get_or_fetch("player", &[("name", "ada")], None, || async {
                Err(TimelineError::NotFound("player ada".to_string()))
            })
            .await;
        assert!(matches!(result, Err(TimelineError::NotFound(_))));
        assert!(cache.store().read().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_or_fetch_invalid_type_skips_fetch() {
        let cache = new_cache();
        let calls = AtomicUsize::new(0);

        let result = cache
            .get_or_fetch("yearly", NO_PARAMS, None, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("never".to_string())
            })
            .await;

        assert!(matches!(result, Err(TimelineError::InvalidLeaderboardType(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_or_fetch_refetches_after_ttl() {
        let cache = new_cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_fetch("daily", NO_PARAMS, Some(50), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("today".to_string())
                })
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_overlapping_invalidate_all_is_not_cached() {
        let cache = new_cache();
        let writer = cache.clone();

        let value = cache
            .get_or_fetch("global", &[("limit", 10)], None, || async move {
                // a new session lands while the board is being built
                writer.invalidate_all().await;
                Ok("before the new session".to_string())
            })
            .await
            .unwrap();
        assert_eq!(value, "before the new session");
        assert!(cache.store().read().await.is_empty());

        let calls = AtomicUsize::new(0);
        cache
            .get_or_fetch("global", &[("limit", 10)], None, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("after the new session".to_string())
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.store().read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_one() {
        let cache = new_cache();
        cache
            .get_or_fetch("global", &[("limit", 10)], None, || async { Ok("a".to_string()) })
            .await
            .unwrap();

        assert!(cache.invalidate("global", &[("limit", 10)]).await.unwrap());
        assert!(!cache.invalidate("global", &[("limit", 10)]).await.unwrap());
        assert!(cache.invalidate("bogus", NO_PARAMS).await.is_err());
    }

    #[tokio::test]
    async fn test_invalidate_all_only_touches_namespace() {
        let cache = new_cache();
        for kind in ["global", "summary", "weekly"] {
            cache
                .get_or_fetch(kind, NO_PARAMS, None, || async { Ok(kind.to_string()) })
                .await
                .unwrap();
        }
        cache.store().write().await.set("session:42", "other".to_string(), None);

        assert_eq!(cache.invalidate_all().await, 3);

        let store = cache.store();
        let mut store = store.write().await;
        assert_eq!(store.len(), 1);
        assert!(store.has("session:42"));
    }

    #[test]
    fn test_blocking_usage() {
        let cache = new_cache();
        let value = tokio_test::block_on(cache.get_or_fetch("summary", NO_PARAMS, None, || async {
            Ok("summary".to_string())
        }))
        .unwrap();
        assert_eq!(value, "summary");
    }
}
