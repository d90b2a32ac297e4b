//! API Module
//!
//! HTTP handlers and routing for the timeline game REST API.
//!
//! # Endpoints
//! - `GET /api/events/random/:count`, `GET /api/events/category/:category`
//! - `POST /api/placement/validate`, `POST /api/placement/insertion-points`
//! - `POST /api/sessions`
//! - `GET /api/statistics/leaderboards/{global,daily,weekly}`,
//!   `GET /api/statistics/leaderboards/category/:category`
//! - `GET /api/statistics/players/:name`, `GET /api/statistics/summary`
//! - `GET /api/cache/stats`, `DELETE /api/cache`
//! - `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
