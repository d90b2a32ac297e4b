//! API Handlers
//!
//! HTTP request handlers for each timeline endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStatsReport, LeaderboardCache, TtlCache};
use crate::config::Config;
use crate::error::{Result, TimelineError};
use crate::events::EventCatalog;
use crate::leaderboard::{GameSession, LeaderboardService, SessionStore};
use crate::models::{
    EventsResponse, HealthResponse, InsertionPointsRequest, InsertionPointsResponse,
    InvalidateResponse, LimitQuery, RecordSessionRequest, ValidatePlacementRequest,
};
use crate::placement::{
    generate_smart_insertion_points, rank_insertion_points, validate_placement_with_tolerance,
    PlacementResult, RandomPicker,
};

/// Largest sample a client may ask for in one call
pub const MAX_RANDOM_EVENTS: usize = 50;

/// Application state shared across all handlers.
///
/// Built once at start-up; every handler reaches the cache through it.
#[derive(Clone)]
pub struct AppState {
    /// Shared leaderboard cache store
    pub cache: Arc<RwLock<TtlCache<Value>>>,
    pub leaderboards: LeaderboardService,
    pub catalog: Arc<EventCatalog>,
}

impl AppState {
    /// Creates a new AppState around an existing cache and catalogue.
    pub fn new(cache: TtlCache<Value>, catalog: EventCatalog) -> Self {
        let cache = Arc::new(RwLock::new(cache));
        let leaderboards = LeaderboardService::new(
            Arc::new(RwLock::new(SessionStore::new())),
            LeaderboardCache::new(Arc::clone(&cache)),
        );
        Self {
            cache,
            leaderboards,
            catalog: Arc::new(catalog),
        }
    }

    /// Creates a new AppState from configuration, with the sample catalogue.
    pub fn from_config(config: &Config) -> Self {
        let cache = TtlCache::new(config.cache_max_size, config.cache_default_ttl_ms);
        Self::new(cache, EventCatalog::with_samples())
    }
}

// == Events ==

/// Handler for GET /api/events/random/:count
pub async fn random_events_handler(
    State(state): State<AppState>,
    Path(count): Path<usize>,
) -> Result<Json<EventsResponse>> {
    if count == 0 || count > MAX_RANDOM_EVENTS {
        return Err(TimelineError::InvalidRequest(format!(
            "Count must be between 1 and {}",
            MAX_RANDOM_EVENTS
        )));
    }
    let events = state.catalog.random(count, &mut rand::thread_rng());
    Ok(Json(EventsResponse::new(events)))
}

/// Handler for GET /api/events/category/:category
pub async fn category_events_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<EventsResponse>> {
    let events = state.catalog.by_category(&category);
    if events.is_empty() {
        return Err(TimelineError::NotFound(format!(
            "No events in category '{}'",
            category
        )));
    }
    Ok(Json(EventsResponse::new(events)))
}

// == Placement ==

/// Handler for POST /api/placement/validate
pub async fn validate_placement_handler(
    Json(req): Json<ValidatePlacementRequest>,
) -> Result<Json<PlacementResult>> {
    let (card, timeline, position) = req.into_parts()?;
    let mut picker = RandomPicker::from_entropy();
    let result = validate_placement_with_tolerance(&card, &timeline, position, &mut picker);
    debug!(
        "Placement of '{}' at {} (correct {}): {:?}",
        card.title, position, result.correct_position, result.feedback_type
    );
    Ok(Json(result))
}

/// Handler for POST /api/placement/insertion-points
pub async fn insertion_points_handler(
    Json(req): Json<InsertionPointsRequest>,
) -> Result<Json<InsertionPointsResponse>> {
    let (timeline, selected, ranked) = req.into_parts()?;
    let mut points = generate_smart_insertion_points(&timeline, selected.as_ref());
    if let (true, Some(card)) = (ranked, selected.as_ref()) {
        rank_insertion_points(&mut points, card.date_occurred);
    }
    Ok(Json(InsertionPointsResponse::new(points)))
}

// == Sessions & Statistics ==

/// Handler for POST /api/sessions
pub async fn record_session_handler(
    State(state): State<AppState>,
    Json(req): Json<RecordSessionRequest>,
) -> Result<Json<GameSession>> {
    if let Some(error_msg) = req.validate() {
        return Err(TimelineError::InvalidRequest(error_msg));
    }
    let session = state.leaderboards.record(req.into_session(Utc::now())).await;
    Ok(Json(session))
}

/// Handler for GET /api/statistics/leaderboards/global
pub async fn global_leaderboard_handler(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Value>> {
    state.leaderboards.global(query.resolve()).await.map(Json)
}

/// Handler for GET /api/statistics/leaderboards/category/:category
pub async fn category_leaderboard_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Value>> {
    state
        .leaderboards
        .category(&category, query.resolve())
        .await
        .map(Json)
}

/// Handler for GET /api/statistics/leaderboards/daily
pub async fn daily_leaderboard_handler(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Value>> {
    state.leaderboards.daily(query.resolve()).await.map(Json)
}

/// Handler for GET /api/statistics/leaderboards/weekly
pub async fn weekly_leaderboard_handler(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Value>> {
    state.leaderboards.weekly(query.resolve()).await.map(Json)
}

/// Handler for GET /api/statistics/players/:name
pub async fn player_stats_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>> {
    state.leaderboards.player(&name).await.map(Json)
}

/// Handler for GET /api/statistics/summary
pub async fn summary_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    state.leaderboards.summary().await.map(Json)
}

// == Cache Administration ==

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsReport> {
    let cache = state.cache.read().await;
    Json(cache.stats())
}

/// Handler for DELETE /api/cache
pub async fn invalidate_cache_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let removed = state.leaderboards.cache().invalidate_all().await;
    Json(InvalidateResponse::new(removed))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventInput;

    fn test_state() -> AppState {
        AppState::new(TtlCache::new(100, 60_000), EventCatalog::with_samples())
    }

    fn input(id: u64, date: &str) -> EventInput {
        EventInput {
            id,
            title: format!("Event {id}"),
            date_occurred: date.to_string(),
            category: "History".to_string(),
            difficulty: 2,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_random_events_handler() {
        let response = random_events_handler(State(test_state()), Path(5)).await.unwrap();
        assert_eq!(response.count, 5);
    }

    #[tokio::test]
    async fn test_random_events_rejects_zero() {
        let result = random_events_handler(State(test_state()), Path(0)).await;
        assert!(matches!(result, Err(TimelineError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_category_events_unknown() {
        let result =
            category_events_handler(State(test_state()), Path("Cooking".to_string())).await;
        assert!(matches!(result, Err(TimelineError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_validate_placement_handler() {
        let req = ValidatePlacementRequest {
            card: input(9, "1989-11-09"),
            timeline: vec![input(1, "1939-09-01"), input(2, "1969-07-20"), input(3, "1989-06-04")],
            position: 3,
        };
        let response = validate_placement_handler(Json(req)).await.unwrap();
        assert!(response.is_correct);
        assert_eq!(response.correct_position, 3);
    }

    #[tokio::test]
    async fn test_insertion_points_handler_ranked() {
        let req = InsertionPointsRequest {
            timeline: vec![input(1, "1900-01-01"), input(2, "2000-01-01")],
            selected_card: Some(input(9, "1902-01-01")),
            ranked: true,
        };
        let response = insertion_points_handler(Json(req)).await.unwrap();
        assert_eq!(response.count, 3);
        assert_eq!(response.points[0].relevance, Some(0.9));
    }

    #[tokio::test]
    async fn test_record_and_read_leaderboard() {
        let state = test_state();
        let req = RecordSessionRequest {
            player_name: "ada".to_string(),
            score: 42,
            category: None,
            correct_placements: 4,
            total_placements: 5,
        };
        record_session_handler(State(state.clone()), Json(req)).await.unwrap();

        let board = global_leaderboard_handler(State(state), Query(LimitQuery { limit: None }))
            .await
            .unwrap();
        assert_eq!(board[0]["bestScore"], 42);
    }

    #[tokio::test]
    async fn test_cache_stats_handler() {
        let response = cache_stats_handler(State(test_state())).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.max_size, 100);
        assert_eq!(response.hit_rate, "0%");
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
