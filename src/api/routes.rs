//! API Routes
//!
//! Configures the Axum router with all timeline endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, category_events_handler, category_leaderboard_handler,
    daily_leaderboard_handler, global_leaderboard_handler, health_handler,
    insertion_points_handler, invalidate_cache_handler, player_stats_handler,
    random_events_handler, record_session_handler, summary_handler, validate_placement_handler,
    weekly_leaderboard_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (the game client is served separately)
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/events/random/:count", get(random_events_handler))
        .route("/api/events/category/:category", get(category_events_handler))
        .route("/api/placement/validate", post(validate_placement_handler))
        .route("/api/placement/insertion-points", post(insertion_points_handler))
        .route("/api/sessions", post(record_session_handler))
        .route("/api/statistics/leaderboards/global", get(global_leaderboard_handler))
        .route(
            "/api/statistics/leaderboards/category/:category",
            get(category_leaderboard_handler),
        )
        .route("/api/statistics/leaderboards/daily", get(daily_leaderboard_handler))
        .route("/api/statistics/leaderboards/weekly", get(weekly_leaderboard_handler))
        .route("/api/statistics/players/:name", get(player_stats_handler))
        .route("/api/statistics/summary", get(summary_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/api/cache", delete(invalidate_cache_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
