//! Event Catalog Module
//!
//! In-memory catalogue of sample events served to the game client.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use super::Event;

/// (title, year, month, day, category, difficulty, description)
type SampleRow = (&'static str, i32, u32, u32, &'static str, u8, &'static str);

#[rustfmt::skip]
const SAMPLE_EVENTS: &[SampleRow] = &[
    ("Battle of Hastings", 1066, 10, 14, "War", 3, "William of Normandy defeats Harold II."),
    ("Magna Carta sealed", 1215, 6, 15, "Politics", 3, "King John seals the charter at Runnymede."),
    ("Columbus reaches the Americas", 1492, 10, 12, "Exploration", 2, "Landfall in the Bahamas."),
    ("US Declaration of Independence", 1776, 7, 4, "Politics", 1, "Adopted by the Continental Congress."),
    ("Storming of the Bastille", 1789, 7, 14, "Politics", 2, "Flashpoint of the French Revolution."),
    ("First powered flight", 1903, 12, 17, "Technology", 2, "The Wright brothers fly at Kitty Hawk."),
    ("Special relativity published", 1905, 6, 30, "Science", 4, "Einstein submits his paper on moving bodies."),
    ("Sinking of the Titanic", 1912, 4, 15, "Disasters", 1, "The liner sinks on its maiden voyage."),
    ("Discovery of penicillin", 1928, 9, 28, "Science", 3, "Alexander Fleming notices mould killing bacteria."),
    ("Start of World War II", 1939, 9, 1, "War", 1, "Germany invades Poland."),
    ("Victory in Europe Day", 1945, 5, 8, "War", 2, "Germany's surrender takes effect."),
    ("Launch of Sputnik 1", 1957, 10, 4, "Science", 3, "The first artificial satellite reaches orbit."),
    ("Apollo 11 Moon landing", 1969, 7, 20, "Science", 1, "Armstrong and Aldrin walk on the Moon."),
    ("Chernobyl disaster", 1986, 4, 26, "Disasters", 2, "Reactor 4 explodes in Soviet Ukraine."),
    ("Fall of the Berlin Wall", 1989, 11, 9, "Politics", 1, "Border crossings open in Berlin."),
    ("Release of Nelson Mandela", 1990, 2, 11, "Politics", 3, "Mandela leaves Victor Verster Prison."),
    ("First website goes live", 1991, 8, 6, "Technology", 4, "The World Wide Web project is announced publicly."),
];

// == Event Catalog ==
/// Read-only collection of events.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Catalogue seeded with the built-in sample events.
    pub fn with_samples() -> Self {
        let events = SAMPLE_EVENTS
            .iter()
            .zip(1u64..)
            .filter_map(|(&(title, y, m, d, category, difficulty, description), id)| {
                let date = NaiveDate::from_ymd_opt(y, m, d)?;
                Some(Event {
                    id,
                    title: title.to_string(),
                    date_occurred: date,
                    category: category.to_string(),
                    difficulty,
                    description: description.to_string(),
                })
            })
            .collect();
        Self::new(events)
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Picks up to `count` distinct events at random.
    pub fn random<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Event> {
        self.events.choose_multiple(rng, count).cloned().collect()
    }

    /// Events whose category matches, ignoring case.
    pub fn by_category(&self, category: &str) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }

    /// Distinct categories in alphabetical order.
    pub fn categories(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| e.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
