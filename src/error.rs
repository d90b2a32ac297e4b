//! Error types for the timeline engine
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Timeline Error Enum ==
/// Unified error type for the timeline engine and its HTTP surface.
#[derive(Error, Debug)]
pub enum TimelineError {
    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A date string could not be parsed into a calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Leaderboard type is not one of the registered prefixes
    #[error("Invalid leaderboard type: {0}")]
    InvalidLeaderboardType(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for TimelineError {
    fn into_response(self) -> Response {
        let status = match &self {
            TimelineError::NotFound(_) => StatusCode::NOT_FOUND,
            TimelineError::InvalidRequest(_)
            | TimelineError::InvalidDate(_)
            | TimelineError::InvalidLeaderboardType(_) => StatusCode::BAD_REQUEST,
            TimelineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the timeline engine.
pub type Result<T> = std::result::Result<T, TimelineError>;
