//! Session Store Module
//!
//! Recorded game sessions and the aggregate queries leaderboards are built from.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

// == Game Session ==
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: u64,
    pub player_name: String,
    pub score: u32,
    pub category: Option<String>,
    pub correct_placements: u32,
    pub total_placements: u32,
    pub played_at: DateTime<Utc>,
}

/// A finished game, before it gets an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub player_name: String,
    pub score: u32,
    pub category: Option<String>,
    pub correct_placements: u32,
    pub total_placements: u32,
    pub played_at: DateTime<Utc>,
}

// == Query Results ==
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player_name: String,
    pub best_score: u32,
    pub games_played: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_name: String,
    pub games_played: usize,
    pub best_score: u32,
    pub average_score: f64,
    pub total_correct: u64,
    pub total_placements: u64,
    /// correct / total placements, 0.0 when nothing was placed
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_sessions: usize,
    pub total_players: usize,
    pub average_score: f64,
    pub highest_score: u32,
    pub categories_played: Vec<String>,
}

// == Session Store ==
/// Append-only, in-memory record of every game played.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<GameSession>,
    next_id: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            next_id: 1,
        }
    }

    pub fn record(&mut self, session: NewSession) -> GameSession {
        let session = GameSession {
            id: self.next_id.max(1),
            player_name: session.player_name,
            score: session.score,
            category: session.category,
            correct_placements: session.correct_placements,
            total_placements: session.total_placements,
            played_at: session.played_at,
        };
        self.next_id = session.id + 1;
        self.sessions.push(session.clone());
        session
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Best score per player across all sessions.
    pub fn global_top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        rank(self.sessions.iter(), limit)
    }

    /// Best score per player within one category, ignoring case.
    pub fn category_top(&self, category: &str, limit: usize) -> Vec<LeaderboardEntry> {
        rank(
            self.sessions.iter().filter(|s| {
                s.category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(category))
            }),
            limit,
        )
    }

    /// Best score per player for sessions played on `day` (UTC).
    pub fn daily_top(&self, day: NaiveDate, limit: usize) -> Vec<LeaderboardEntry> {
        rank(
            self.sessions
                .iter()
                .filter(|s| s.played_at.date_naive() == day),
            limit,
        )
    }

    /// Best score per player for the seven days starting at `week_start`.
    pub fn weekly_top(&self, week_start: NaiveDate, limit: usize) -> Vec<LeaderboardEntry> {
        let week_end = week_start.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX);
        rank(
            self.sessions.iter().filter(|s| {
                let day = s.played_at.date_naive();
                day >= week_start && day < week_end
            }),
            limit,
        )
    }

    /// Aggregates for one player, `None` if they never played.
    pub fn player_stats(&self, player_name: &str) -> Option<PlayerStats> {
        let games: Vec<&GameSession> = self
            .sessions
            .iter()
            .filter(|s| s.player_name == player_name)
            .collect();
        if games.is_empty() {
            return None;
        }

        let total_score: u64 = games.iter().map(|s| u64::from(s.score)).sum();
        let total_correct: u64 = games.iter().map(|s| u64::from(s.correct_placements)).sum();
        let total_placements: u64 = games.iter().map(|s| u64::from(s.total_placements)).sum();

        Some(PlayerStats {
            player_name: player_name.to_string(),
            games_played: games.len(),
            best_score: games.iter().map(|s| s.score).max().unwrap_or(0),
            average_score: total_score as f64 / games.len() as f64,
            total_correct,
            total_placements,
            accuracy: if total_placements == 0 {
                0.0
            } else {
                total_correct as f64 / total_placements as f64
            },
        })
    }

    pub fn summary(&self) -> Summary {
        let players: BTreeSet<&str> = self
            .sessions
            .iter()
            .map(|s| s.player_name.as_str())
            .collect();
        let categories: BTreeSet<String> = self
            .sessions
            .iter()
            .filter_map(|s| s.category.clone())
            .collect();
        let total_score: u64 = self.sessions.iter().map(|s| u64::from(s.score)).sum();

        Summary {
            total_sessions: self.sessions.len(),
            total_players: players.len(),
            average_score: if self.sessions.is_empty() {
                0.0
            } else {
                total_score as f64 / self.sessions.len() as f64
            },
            highest_score: self.sessions.iter().map(|s| s.score).max().unwrap_or(0),
            categories_played: categories.into_iter().collect(),
        }
    }
}

/// Groups by player, keeps each player's best score, orders by score
/// descending then name, and numbers the first `limit` rows from 1.
fn rank<'a>(
    sessions: impl Iterator<Item = &'a GameSession>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut per_player: HashMap<&str, (u32, usize)> = HashMap::new();
    for session in sessions {
        let slot = per_player.entry(session.player_name.as_str()).or_insert((0, 0));
        slot.0 = slot.0.max(session.score);
        slot.1 += 1;
    }

    let mut rows: Vec<(&str, u32, usize)> = per_player
        .into_iter()
        .map(|(name, (best, games))| (name, best, games))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    rows.into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (name, best_score, games_played))| LeaderboardEntry {
            rank: i + 1,
            player_name: name.to_string(),
            best_score,
            games_played,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn session(
        player: &str,
        score: u32,
        category: Option<&str>,
        played_at: DateTime<Utc>,
    ) -> NewSession {
        NewSession {
            player_name: player.to_string(),
            score,
            category: category.map(str::to_string),
            correct_placements: score / 10,
            total_placements: 10,
            played_at,
        }
    }

    fn seeded_store() -> SessionStore {
        let mut store = SessionStore::new();
        store.record(session("ada", 80, Some("Science"), at(2026, 10, 12)));
        store.record(session("ada", 95, Some("War"), at(2026, 10, 19)));
        store.record(session("bob", 90, Some("Science"), at(2026, 10, 19)));
        store.record(session("cy", 40, None, at(2026, 10, 14)));
        store
    }

    #[test]
    fn test_record_assigns_ids() {
        let mut store = SessionStore::new();
        let first = store.record(session("ada", 10, None, at(2026, 1, 1)));
        let second = store.record(session("bob", 20, None, at(2026, 1, 1)));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_global_top_best_score_per_player() {
        let top = seeded_store().global_top(10);
        let names: Vec<&str> = top.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["ada", "bob", "cy"]);
        assert_eq!(top[0].best_score, 95);
        assert_eq!(top[0].games_played, 2);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[2].rank, 3);
    }

    #[test]
    fn test_global_top_limit() {
        assert_eq!(seeded_store().global_top(2).len(), 2);
        assert!(seeded_store().global_top(0).is_empty());
    }

    #[test]
    fn test_ties_break_by_name() {
        let mut store = SessionStore::new();
        store.record(session("zed", 50, None, at(2026, 1, 1)));
        store.record(session("amy", 50, None, at(2026, 1, 1)));
        let top = store.global_top(10);
        assert_eq!(top[0].player_name, "amy");
    }

    #[test]
    fn test_category_top() {
        let top = seeded_store().category_top("science", 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player_name, "bob");
        assert_eq!(top[1].best_score, 80);
    }

    #[test]
    fn test_daily_and_weekly() {
        let store = seeded_store();

        let daily = store.daily_top(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), 10);
        assert_eq!(daily.len(), 2);

        let weekly = store.weekly_top(NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(), 10);
        let names: Vec<&str> = weekly.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["ada", "cy"]);
        assert_eq!(weekly[0].best_score, 80);
    }

    #[test]
    fn test_player_stats() {
        let stats = seeded_store().player_stats("ada").unwrap();
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.best_score, 95);
        assert_eq!(stats.average_score, 87.5);
        assert_eq!(stats.total_correct, 17);
        assert_eq!(stats.total_placements, 20);
        assert!((stats.accuracy - 0.85).abs() < 1e-9);

        assert!(seeded_store().player_stats("nobody").is_none());
    }

    #[test]
    fn test_summary() {
        let summary = seeded_store().summary();
        assert_eq!(summary.total_sessions, 4);
        assert_eq!(summary.total_players, 3);
        assert_eq!(summary.highest_score, 95);
        assert_eq!(summary.average_score, 76.25);
        assert_eq!(summary.categories_played, vec!["Science", "War"]);
    }

    #[test]
    fn test_summary_empty() {
        let summary = SessionStore::new().summary();
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.highest_score, 0);
    }
}
