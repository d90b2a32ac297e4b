//! Timeline Engine - backend for a historical timeline card game
//!
//! Validates where players place event cards on a chronological timeline and
//! serves leaderboards through a TTL cache with LRU eviction.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod models;
pub mod placement;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, TimelineError};
pub use tasks::spawn_cleanup_task;
