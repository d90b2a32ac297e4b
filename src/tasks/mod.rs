//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache cleanup: sweeps expired leaderboard cache entries (production only)

mod cleanup;

pub use cleanup::spawn_cleanup_task;
