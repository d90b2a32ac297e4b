//! Placement Module
//!
//! Chronological placement engine: where a card belongs, how a player's
//! attempt is graded, and which slots to offer as hints.

pub mod feedback;
mod insertion;
mod position;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use feedback::{
    close_match_feedback, exact_match_feedback, missed_feedback, Direction, FixedPicker,
    RandomPicker, TemplatePicker,
};
pub use insertion::{
    calculate_insertion_point_relevance, generate_smart_insertion_points, rank_insertion_points,
    Difficulty, InsertionPoint, SlotPosition, DEFAULT_RELEVANCE, EASY_GAP_YEARS, HARD_GAP_YEARS,
};
pub use position::{
    find_correct_position, validate_placement_with_tolerance, FeedbackType, PlacementResult,
};
