//! Feedback Module
//!
//! Player-facing messages for a placement attempt. Each generator picks one
//! template from a fixed pool through a [`TemplatePicker`], so tests can pin
//! the choice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::events::Event;

// == Template Pools ==
const EXACT_MATCH_TEMPLATES: &[&str] = &[
    "Perfect! {title} happened in {year}.",
    "Spot on! {title} belongs exactly there.",
    "Exactly right! {title} took place in the {decade}.",
    "Brilliant placement! {title} fits perfectly in {year}.",
];

const MISSED_TEMPLATES: &[&str] = &[
    "Not quite. {title} happened in {year}, try looking {direction} on the timeline.",
    "{title} took place in {year}. It belongs {direction} than where you put it.",
    "Missed! {title} is from the {decade} ({year}), look {direction}.",
    "Keep going {direction}: {title} happened in {year}.",
];

const CLOSE_MATCH_TEMPLATES: &[&str] = &[
    "So close! {title} happened in {year}, just a little {direction}.",
    "Almost! {title} belongs slightly {direction}, in {year}.",
    "Nearly there. {title} is from {year}, one step {direction}.",
];

// == Direction ==
/// Which way the player should move the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Earlier,
    Later,
}

impl Direction {
    /// Direction from the slot the player chose towards the correct one.
    pub fn from_positions(user_position: usize, correct_position: usize) -> Self {
        if user_position > correct_position {
            Direction::Earlier
        } else {
            Direction::Later
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Earlier => "earlier",
            Direction::Later => "later",
        }
    }
}

// == Template Picker ==
/// Chooses one template index out of `len` candidates.
pub trait TemplatePicker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform choice backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TemplatePicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }
}

/// Always returns the same index, clamped to the pool size.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl TemplatePicker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

// == Generators ==
/// Positive reinforcement for an exact placement.
pub fn exact_match_feedback<P: TemplatePicker + ?Sized>(card: &Event, picker: &mut P) -> String {
    render(choose(EXACT_MATCH_TEMPLATES, picker), card, None)
}

/// Guidance after a wrong placement. Always names the card and its year.
pub fn missed_feedback<P: TemplatePicker + ?Sized>(
    card: &Event,
    direction: Direction,
    picker: &mut P,
) -> String {
    render(choose(MISSED_TEMPLATES, picker), card, Some(direction))
}

/// Message for a near miss.
///
/// The validator never grants partial credit, so nothing in the placement
/// flow produces this today; it is kept for callers that want softer wording.
pub fn close_match_feedback<P: TemplatePicker + ?Sized>(
    card: &Event,
    direction: Direction,
    picker: &mut P,
) -> String {
    render(choose(CLOSE_MATCH_TEMPLATES, picker), card, Some(direction))
}

fn choose<'a, P: TemplatePicker + ?Sized>(pool: &[&'a str], picker: &mut P) -> &'a str {
    let index = picker.pick(pool.len()).min(pool.len() - 1);
    pool[index]
}

fn render(template: &str, card: &Event, direction: Option<Direction>) -> String {
    let rendered = template
        .replace("{title}", &card.title)
        .replace("{year}", &year_label(card.year()))
        .replace("{decade}", &decade_label(card));
    match direction {
        Some(direction) => rendered.replace("{direction}", direction.as_str()),
        None => rendered,
    }
}

/// Four-digit year for the common era. Years up to 0 are astronomical
/// (0 is 1 BCE) and read as `<n> BCE`.
fn year_label(year: i32) -> String {
    if year > 0 {
        format!("{:04}", year)
    } else {
        format!("{} BCE", 1 - i64::from(year))
    }
}

/// `1980s`, or `40s BCE` for the decade containing 44 BCE.
fn decade_label(card: &Event) -> String {
    if card.year() > 0 {
        format!("{}s", card.decade())
    } else {
        let bce = 1 - i64::from(card.year());
        format!("{}s BCE", bce.div_euclid(10) * 10)
    }
}
