//! Leaderboard Module
//!
//! Game sessions, the aggregate queries over them, and the cached service
//! the statistics endpoints call.

mod service;
mod session;

pub use service::LeaderboardService;
pub use session::{
    GameSession, LeaderboardEntry, NewSession, PlayerStats, SessionStore, Summary,
};
