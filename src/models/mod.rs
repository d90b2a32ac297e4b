//! Request and Response models for the timeline API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    EventInput, InsertionPointsRequest, LimitQuery, RecordSessionRequest, ValidatePlacementRequest,
};
pub use responses::{EventsResponse, HealthResponse, InsertionPointsResponse, InvalidateResponse};
