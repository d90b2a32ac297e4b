//! Response DTOs for the timeline API
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! domain types already.

use serde::Serialize;

use crate::events::Event;
use crate::placement::InsertionPoint;

/// Response body for the event listing endpoints
#[derive(Debug, Clone, Serialize)]
pub struct EventsResponse {
    pub count: usize,
    pub events: Vec<Event>,
}

impl EventsResponse {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            count: events.len(),
            events,
        }
    }
}

/// Response body for POST /api/placement/insertion-points
#[derive(Debug, Clone, Serialize)]
pub struct InsertionPointsResponse {
    pub count: usize,
    pub points: Vec<InsertionPoint>,
}

impl InsertionPointsResponse {
    pub fn new(points: Vec<InsertionPoint>) -> Self {
        Self {
            count: points.len(),
            points,
        }
    }
}

/// Response body for DELETE /api/cache
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Invalidated {} cached leaderboards", removed),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
