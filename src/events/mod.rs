//! Events Module
//!
//! Historical events and the sample catalogue handed out to players.

mod catalog;
mod event;

pub use catalog::EventCatalog;
pub use event::{Event, MAX_DIFFICULTY, MIN_DIFFICULTY};
