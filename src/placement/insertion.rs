//! Insertion Point Module
//!
//! Candidate slots on a timeline, annotated with difficulty and relevance
//! hints for the client.

use chrono::NaiveDate;
use serde::Serialize;

use crate::events::Event;

/// Gap (in years) above which a slot between two cards is easy to spot.
pub const EASY_GAP_YEARS: i32 = 50;

/// Gap (in years) below which a slot between two cards is hard to spot.
pub const HARD_GAP_YEARS: i32 = 10;

/// Relevance assigned to every slot when a card is selected but not scored.
pub const DEFAULT_RELEVANCE: f64 = 0.5;

const DAYS_PER_YEAR: f64 = 365.25;

// == Slot Position ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotPosition {
    Before,
    Between,
    After,
}

// == Difficulty ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Classifies the slot between two cards `gap_years` apart.
    ///
    /// Exactly 50 and exactly 10 both stay medium.
    pub fn from_gap(gap_years: i32) -> Self {
        let mut difficulty = Difficulty::Medium;
        if gap_years > EASY_GAP_YEARS {
            difficulty = Difficulty::Easy;
        }
        if gap_years < HARD_GAP_YEARS {
            difficulty = Difficulty::Hard;
        }
        difficulty
    }
}

// == Insertion Point ==
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertionPoint {
    pub index: usize,
    pub position: SlotPosition,
    /// Card the slot is anchored to; `None` only on an empty timeline.
    pub reference_card: Option<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_card: Option<Event>,
    pub difficulty: Difficulty,
    /// Years between the reference and next card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
}

// == Generate Insertion Points ==
/// Builds the `timeline.len() + 1` slots of a timeline.
///
/// The timeline is sorted on a private copy first. When `selected_card` is
/// given, every slot gets the flat [`DEFAULT_RELEVANCE`]; use
/// [`rank_insertion_points`] for real scores.
pub fn generate_smart_insertion_points(
    timeline: &[Event],
    selected_card: Option<&Event>,
) -> Vec<InsertionPoint> {
    let mut sorted = timeline.to_vec();
    sorted.sort_by_key(|event| event.date_occurred);

    let relevance = selected_card.map(|_| DEFAULT_RELEVANCE);

    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first.clone(), last.clone()),
        _ => {
            return vec![InsertionPoint {
                index: 0,
                position: SlotPosition::Before,
                reference_card: None,
                next_card: None,
                difficulty: Difficulty::Medium,
                gap: None,
                relevance,
            }]
        }
    };

    let mut points = Vec::with_capacity(sorted.len() + 1);

    points.push(InsertionPoint {
        index: 0,
        position: SlotPosition::Before,
        reference_card: Some(first),
        next_card: None,
        difficulty: Difficulty::Easy,
        gap: None,
        relevance,
    });

    for (i, pair) in sorted.windows(2).enumerate() {
        let (reference, next) = (&pair[0], &pair[1]);
        let gap = next.year() - reference.year();
        points.push(InsertionPoint {
            index: i + 1,
            position: SlotPosition::Between,
            reference_card: Some(reference.clone()),
            next_card: Some(next.clone()),
            difficulty: Difficulty::from_gap(gap),
            gap: Some(gap),
            relevance,
        });
    }

    points.push(InsertionPoint {
        index: sorted.len(),
        position: SlotPosition::After,
        reference_card: Some(last),
        next_card: None,
        difficulty: Difficulty::Easy,
        gap: None,
        relevance,
    });

    points
}

// == Relevance ==
/// Scores how well `card_date` fits a slot.
///
/// A step function: the only possible results are 1.0, 0.9, 0.7, 0.5 and 0.3.
pub fn calculate_insertion_point_relevance(point: &InsertionPoint, card_date: NaiveDate) -> f64 {
    match (&point.reference_card, &point.next_card) {
        (None, None) => 0.5,
        (Some(reference), Some(next)) => {
            let total_gap = days_between(reference.date_occurred, next.date_occurred);
            if total_gap == 0 {
                return 1.0;
            }
            let ratio = days_between(reference.date_occurred, card_date) as f64 / total_gap as f64;
            let offset = (ratio - 0.5).abs();
            if offset == 0.0 {
                1.0
            } else if offset < 0.1 {
                0.9
            } else if offset < 0.3 {
                0.7
            } else {
                0.3
            }
        }
        (Some(reference), None) => {
            let days = days_between(reference.date_occurred, card_date).abs();
            let years = days as f64 / DAYS_PER_YEAR;
            if years <= 5.0 {
                0.9
            } else if years <= 20.0 {
                0.7
            } else {
                0.3
            }
        }
        (None, Some(_)) => 0.5,
    }
}

/// Replaces each slot's relevance with its score for `card_date`.
pub fn rank_insertion_points(points: &mut [InsertionPoint], card_date: NaiveDate) {
    for point in points.iter_mut() {
        point.relevance = Some(calculate_insertion_point_relevance(point, card_date));
    }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}
