//! Position Module
//!
//! Finds where a card belongs on a timeline and grades a player's attempt.

use serde::Serialize;

use super::feedback::{exact_match_feedback, missed_feedback, Direction, TemplatePicker};
use crate::events::Event;

// == Feedback Type ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Perfect,
    Miss,
}

// == Placement Result ==
/// Outcome of a single placement attempt.
///
/// `is_correct`, `position_diff == 0` and `feedback_type == Perfect` always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
    pub is_correct: bool,
    /// Always false: near misses earn no partial credit.
    pub is_close: bool,
    pub correct_position: usize,
    pub user_position: usize,
    pub position_diff: usize,
    pub feedback_type: FeedbackType,
    pub feedback: String,
}

// == Find Correct Position ==
/// Index at which `card` keeps the timeline in chronological order.
///
/// Counts the events dated strictly before the card. On a sorted timeline this
/// is the smallest `i` with `card <= timeline[i]` (or `timeline.len()` when the
/// card is the newest); on an unsorted one it is the card's index in the
/// sorted timeline.
pub fn find_correct_position(card: &Event, timeline: &[Event]) -> usize {
    timeline
        .iter()
        .filter(|event| event.date_occurred < card.date_occurred)
        .count()
}

// == Validate Placement ==
/// Grades a placement at `user_position`. Only the exact slot counts.
pub fn validate_placement_with_tolerance<P: TemplatePicker + ?Sized>(
    card: &Event,
    timeline: &[Event],
    user_position: usize,
    picker: &mut P,
) -> PlacementResult {
    let correct_position = find_correct_position(card, timeline);
    let position_diff = user_position.abs_diff(correct_position);
    let is_correct = position_diff == 0;

    let (feedback_type, feedback) = if is_correct {
        (FeedbackType::Perfect, exact_match_feedback(card, picker))
    } else {
        let direction = Direction::from_positions(user_position, correct_position);
        (FeedbackType::Miss, missed_feedback(card, direction, picker))
    };

    PlacementResult {
        is_correct,
        is_close: false,
        correct_position,
        user_position,
        position_diff,
        feedback_type,
        feedback,
    }
}
