//! Request DTOs for the timeline API
//!
//! Dates arrive as strings and are parsed when the DTO is converted into
//! domain types, so a malformed date becomes a 400 rather than a misplaced card.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Result, TimelineError};
use crate::events::Event;
use crate::leaderboard::NewSession;

/// Maximum accepted player name length
pub const MAX_PLAYER_NAME_LENGTH: usize = 64;

/// Maximum number of events in a submitted timeline
pub const MAX_TIMELINE_LENGTH: usize = 500;

// == Event Input ==
/// An event as sent by the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub id: u64,
    pub title: String,
    pub date_occurred: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub description: String,
}

fn default_difficulty() -> u8 {
    3
}

impl TryFrom<EventInput> for Event {
    type Error = TimelineError;

    fn try_from(input: EventInput) -> Result<Self> {
        let event = Event {
            id: input.id,
            date_occurred: Event::parse_date(&input.date_occurred)?,
            title: input.title,
            category: input.category,
            difficulty: input.difficulty,
            description: input.description,
        };
        event.validate()?;
        Ok(event)
    }
}

fn convert_timeline(timeline: Vec<EventInput>) -> Result<Vec<Event>> {
    if timeline.len() > MAX_TIMELINE_LENGTH {
        return Err(TimelineError::InvalidRequest(format!(
            "Timeline exceeds maximum length of {} events",
            MAX_TIMELINE_LENGTH
        )));
    }
    timeline.into_iter().map(Event::try_from).collect()
}

// == Validate Placement ==
/// Request body for POST /api/placement/validate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePlacementRequest {
    pub card: EventInput,
    pub timeline: Vec<EventInput>,
    /// Slot the player chose, `0..=timeline.len()`
    pub position: usize,
}

impl ValidatePlacementRequest {
    /// Converts into `(card, timeline, position)`, rejecting out-of-range slots.
    pub fn into_parts(self) -> Result<(Event, Vec<Event>, usize)> {
        let card = Event::try_from(self.card)?;
        let timeline = convert_timeline(self.timeline)?;
        if self.position > timeline.len() {
            return Err(TimelineError::InvalidRequest(format!(
                "Position {} is outside the timeline (0..={})",
                self.position,
                timeline.len()
            )));
        }
        Ok((card, timeline, self.position))
    }
}

// == Insertion Points ==
/// Request body for POST /api/placement/insertion-points
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertionPointsRequest {
    pub timeline: Vec<EventInput>,
    #[serde(default)]
    pub selected_card: Option<EventInput>,
    /// Score each slot against the selected card instead of the flat default
    #[serde(default)]
    pub ranked: bool,
}

impl InsertionPointsRequest {
    pub fn into_parts(self) -> Result<(Vec<Event>, Option<Event>, bool)> {
        let timeline = convert_timeline(self.timeline)?;
        let selected = self.selected_card.map(Event::try_from).transpose()?;
        if self.ranked && selected.is_none() {
            return Err(TimelineError::InvalidRequest(
                "Ranked insertion points need a selectedCard".to_string(),
            ));
        }
        Ok((timeline, selected, self.ranked))
    }
}

// == Record Session ==
/// Request body for POST /api/sessions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSessionRequest {
    pub player_name: String,
    pub score: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub correct_placements: u32,
    #[serde(default)]
    pub total_placements: u32,
}

impl RecordSessionRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let name = self.player_name.trim();
        if name.is_empty() {
            return Some("Player name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_PLAYER_NAME_LENGTH {
            return Some(format!(
                "Player name exceeds maximum length of {} characters",
                MAX_PLAYER_NAME_LENGTH
            ));
        }
        if self.correct_placements > self.total_placements {
            return Some("Correct placements cannot exceed total placements".to_string());
        }
        None
    }

    pub fn into_session(self, played_at: DateTime<Utc>) -> NewSession {
        NewSession {
            player_name: self.player_name.trim().to_string(),
            score: self.score,
            category: self.category.filter(|c| !c.trim().is_empty()),
            correct_placements: self.correct_placements,
            total_placements: self.total_placements,
            played_at,
        }
    }
}

// == Query Parameters ==
/// `?limit=` on leaderboard reads
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

impl LimitQuery {
    pub const DEFAULT: usize = 10;
    pub const MAX: usize = 100;

    /// Requested limit, defaulted and clamped to `1..=MAX`.
    pub fn resolve(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT).clamp(1, Self::MAX)
    }
}
