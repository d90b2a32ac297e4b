//! Leaderboard Service Module
//!
//! Reads leaderboards through the cache and invalidates it when a new game
//! is recorded.

use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use super::session::{GameSession, NewSession, SessionStore};
use crate::cache::{LeaderboardCache, LeaderboardKind, NO_PARAMS};
use crate::error::{Result, TimelineError};

/// Time-window boards turn over quickly, so they live shorter than the default.
const WINDOW_TTL_MS: u64 = 60_000;

// == Leaderboard Service ==
#[derive(Debug, Clone)]
pub struct LeaderboardService {
    sessions: Arc<RwLock<SessionStore>>,
    cache: LeaderboardCache<Value>,
}

impl LeaderboardService {
    pub fn new(sessions: Arc<RwLock<SessionStore>>, cache: LeaderboardCache<Value>) -> Self {
        Self { sessions, cache }
    }

    pub fn cache(&self) -> &LeaderboardCache<Value> {
        &self.cache
    }

    /// Stores a finished game and drops every cached leaderboard.
    ///
    /// A leaderboard fetch already running when this lands is returned to its
    /// caller but not cached, so the next read sees the new game.
    pub async fn record(&self, session: NewSession) -> GameSession {
        let session = self.sessions.write().await.record(session);
        let invalidated = self.cache.invalidate_all().await;
        info!(
            "Recorded session {} for '{}' (score {}), invalidated {} cached leaderboards",
            session.id, session.player_name, session.score, invalidated
        );
        session
    }

    pub async fn global(&self, limit: usize) -> Result<Value> {
        let sessions = Arc::clone(&self.sessions);
        self.cache
            .get_or_fetch(
                LeaderboardKind::Global.as_str(),
                &[("limit", limit)],
                None,
                || async move {
                    let store = sessions.read().await;
                    to_json(&store.global_top(limit))
                },
            )
            .await
    }

    pub async fn category(&self, category: &str, limit: usize) -> Result<Value> {
        let sessions = Arc::clone(&self.sessions);
        let category = category.to_ascii_lowercase();
        let params = [("category", category.clone()), ("limit", limit.to_string())];
        self.cache
            .get_or_fetch(LeaderboardKind::Category.as_str(), &params, None, || async move {
                let store = sessions.read().await;
                to_json(&store.category_top(&category, limit))
            })
            .await
    }

    /// Today's board (UTC).
    pub async fn daily(&self, limit: usize) -> Result<Value> {
        let day = Utc::now().date_naive();
        let sessions = Arc::clone(&self.sessions);
        let params = [("date", day.to_string()), ("limit", limit.to_string())];
        self.cache
            .get_or_fetch(
                LeaderboardKind::Daily.as_str(),
                &params,
                Some(WINDOW_TTL_MS),
                || async move {
                    let store = sessions.read().await;
                    to_json(&store.daily_top(day, limit))
                },
            )
            .await
    }

    /// The current Monday-to-Sunday week (UTC).
    pub async fn weekly(&self, limit: usize) -> Result<Value> {
        let start = week_start(Utc::now().date_naive());
        let sessions = Arc::clone(&self.sessions);
        let params = [("week", start.to_string()), ("limit", limit.to_string())];
        self.cache
            .get_or_fetch(
                LeaderboardKind::Weekly.as_str(),
                &params,
                Some(WINDOW_TTL_MS),
                || async move {
                    let store = sessions.read().await;
                    to_json(&store.weekly_top(start, limit))
                },
            )
            .await
    }

    pub async fn player(&self, player_name: &str) -> Result<Value> {
        let sessions = Arc::clone(&self.sessions);
        let name = player_name.to_string();
        self.cache
            .get_or_fetch(
                LeaderboardKind::Player.as_str(),
                &[("name", player_name)],
                None,
                || async move {
                    let stats = sessions.read().await.player_stats(&name);
                    match stats {
                        Some(stats) => to_json(&stats),
                        None => Err(TimelineError::NotFound(format!(
                            "Player '{}' has no games",
                            name
                        ))),
                    }
                },
            )
            .await
    }

    pub async fn summary(&self) -> Result<Value> {
        let sessions = Arc::clone(&self.sessions);
        self.cache
            .get_or_fetch(LeaderboardKind::Summary.as_str(), NO_PARAMS, None, || async move {
                let store = sessions.read().await;
                to_json(&store.summary())
            })
            .await
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| TimelineError::Internal(e.to_string()))
}

/// Monday on or before `day`.
fn week_start(day: NaiveDate) -> NaiveDate {
    let offset = u64::from(day.weekday().num_days_from_monday());
    day.checked_sub_days(Days::new(offset)).unwrap_or(day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;

    fn service() -> LeaderboardService {
        LeaderboardService::new(
            Arc::new(RwLock::new(SessionStore::new())),
            LeaderboardCache::new(Arc::new(RwLock::new(TtlCache::new(100, 60_000)))),
        )
    }

    fn game(player: &str, score: u32, category: Option<&str>) -> NewSession {
        NewSession {
            player_name: player.to_string(),
            score,
            category: category.map(str::to_string),
            correct_placements: 5,
            total_placements: 10,
            played_at: Utc::now(),
        }
    }

    #[test]
    fn test_week_start() {
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert_eq!(week_start(sunday), monday);
        assert_eq!(week_start(monday), monday);
    }

    #[tokio::test]
    async fn test_global_is_cached_until_new_session() {
        let service = service();
        service.record(game("ada", 70, None)).await;

        let first = service.global(10).await.unwrap();
        assert_eq!(first[0]["playerName"], "ada");

        // served from cache
        let again = service.global(10).await.unwrap();
        assert_eq!(first, again);
        assert_eq!(service.cache().store().read().await.stats().hits, 1);

        service.record(game("bob", 99, None)).await;
        let refreshed = service.global(10).await.unwrap();
        assert_eq!(refreshed[0]["playerName"], "bob");
        assert_eq!(refreshed.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_category_key_is_case_insensitive() {
        let service = service();
        service.record(game("ada", 70, Some("Science"))).await;

        let lower = service.category("science", 10).await.unwrap();
        let upper = service.category("SCIENCE", 10).await.unwrap();
        assert_eq!(lower, upper);
        assert_eq!(service.cache().store().read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_daily_and_weekly_include_todays_games() {
        let service = service();
        service.record(game("ada", 70, None)).await;

        let daily = service.daily(10).await.unwrap();
        let weekly = service.weekly(10).await.unwrap();
        assert_eq!(daily[0]["bestScore"], 70);
        assert_eq!(weekly[0]["bestScore"], 70);
    }

    #[tokio::test]
    async fn test_unknown_player_is_not_found_and_not_cached() {
        let service = service();
        let result = service.player("ghost").await;
        assert!(matches!(result, Err(TimelineError::NotFound(_))));
        assert!(service.cache().store().read().await.is_empty());
    }

    #[tokio::test]
    async fn test_player_and_summary() {
        let service = service();
        service.record(game("ada", 60, Some("War"))).await;
        service.record(game("ada", 80, Some("Science"))).await;

        let player = service.player("ada").await.unwrap();
        assert_eq!(player["gamesPlayed"], 2);
        assert_eq!(player["bestScore"], 80);

        let summary = service.summary().await.unwrap();
        assert_eq!(summary["totalSessions"], 2);
        assert_eq!(summary["totalPlayers"], 1);
    }
}
