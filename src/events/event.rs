//! Event Module
//!
//! A historical event, the card a player places on the timeline.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Lowest allowed difficulty rating
pub const MIN_DIFFICULTY: u8 = 1;

/// Highest allowed difficulty rating
pub const MAX_DIFFICULTY: u8 = 5;

// == Event ==
/// A dated historical occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u64,
    pub title: String,
    pub date_occurred: NaiveDate,
    pub category: String,
    pub difficulty: u8,
    #[serde(default)]
    pub description: String,
}

impl Event {
    /// Creates an event with an empty description and medium difficulty.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        date_occurred: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            date_occurred,
            category: category.into(),
            difficulty: 3,
            description: String::new(),
        }
    }

    /// Parses a date string at the API boundary.
    ///
    /// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the date part is kept).
    pub fn parse_date(raw: &str) -> Result<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .map_err(|_| TimelineError::InvalidDate(raw.to_string()))
    }

    /// Checks the fields a client can get wrong.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TimelineError::InvalidRequest(format!(
                "Event {} has an empty title",
                self.id
            )));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(TimelineError::InvalidRequest(format!(
                "Event {} difficulty must be between {} and {}, got {}",
                self.id, MIN_DIFFICULTY, MAX_DIFFICULTY, self.difficulty
            )));
        }
        Ok(())
    }

    pub fn year(&self) -> i32 {
        self.date_occurred.year()
    }

    /// First year of the decade the event falls in (1989 -> 1980).
    pub fn decade(&self) -> i32 {
        self.year().div_euclid(10) * 10
    }
}
