//! Property-Based Tests for Placement Module
//!
//! Uses proptest to check the placement engine over arbitrary timelines.

use chrono::NaiveDate;
use proptest::prelude::*;

use crate::events::Event;
use crate::placement::{
    calculate_insertion_point_relevance, find_correct_position, generate_smart_insertion_points,
    rank_insertion_points, validate_placement_with_tolerance, FeedbackType, RandomPicker,
};

// == Strategies ==
/// Days since 0001-01-01 covering roughly 1000..2100 AD
fn day_strategy() -> impl Strategy<Value = i32> {
    365_000..767_000i32
}

fn event_from_day(id: u64, day: i32) -> Event {
    let date = NaiveDate::from_num_days_from_ce_opt(day).unwrap();
    Event::new(id, format!("Event {id}"), date, "History")
}

fn timeline_strategy() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(day_strategy(), 0..30).prop_map(|days| {
        days.into_iter()
            .enumerate()
            .map(|(i, day)| event_from_day(i as u64 + 1, day))
            .collect()
    })
}

fn sorted_timeline_strategy() -> impl Strategy<Value = Vec<Event>> {
    timeline_strategy().prop_map(|mut timeline| {
        timeline.sort_by_key(|e| e.date_occurred);
        timeline
    })
}

fn card_strategy() -> impl Strategy<Value = Event> {
    day_strategy().prop_map(|day| event_from_day(10_000, day))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Inserting the card at the returned index keeps the timeline sorted.
    #[test]
    fn prop_correct_position_preserves_order(
        timeline in sorted_timeline_strategy(),
        card in card_strategy(),
    ) {
        let index = find_correct_position(&card, &timeline);
        prop_assert!(index <= timeline.len());

        let mut placed = timeline.clone();
        placed.insert(index, card.clone());
        prop_assert!(placed.windows(2).all(|w| w[0].date_occurred <= w[1].date_occurred));

        // smallest such index
        if index < timeline.len() {
            prop_assert!(card.date_occurred <= timeline[index].date_occurred);
        }
        if index > 0 {
            prop_assert!(timeline[index - 1].date_occurred < card.date_occurred);
        }
    }

    // A placement is correct exactly when it hits the computed index.
    #[test]
    fn prop_correct_iff_exact_position(
        timeline in sorted_timeline_strategy(),
        card in card_strategy(),
        seed in any::<u64>(),
        offset in 0usize..40,
    ) {
        let user_position = offset.min(timeline.len());
        let mut picker = RandomPicker::seeded(seed);
        let result =
            validate_placement_with_tolerance(&card, &timeline, user_position, &mut picker);

        let expected = find_correct_position(&card, &timeline);
        prop_assert_eq!(result.is_correct, user_position == expected);
        prop_assert_eq!(result.is_correct, result.position_diff == 0);
        prop_assert_eq!(result.is_correct, result.feedback_type == FeedbackType::Perfect);
        prop_assert!(!result.is_close);
        prop_assert!(result.feedback.contains(&card.title));
        if !result.is_correct {
            let year = format!("{:04}", card.year());
            prop_assert!(result.feedback.contains(&year));
        }
    }

    // Every timeline yields one slot per gap plus the two ends.
    #[test]
    fn prop_insertion_point_count(timeline in timeline_strategy()) {
        let points = generate_smart_insertion_points(&timeline, None);
        prop_assert_eq!(points.len(), timeline.len() + 1);
        for (i, point) in points.iter().enumerate() {
            prop_assert_eq!(point.index, i);
        }
    }

    // Relevance never leaves the fixed table of values.
    #[test]
    fn prop_relevance_in_closed_table(
        timeline in timeline_strategy(),
        card in card_strategy(),
    ) {
        let mut points = generate_smart_insertion_points(&timeline, Some(&card));
        for point in &points {
            let score = calculate_insertion_point_relevance(point, card.date_occurred);
            prop_assert!([1.0, 0.9, 0.7, 0.5, 0.3].contains(&score), "unexpected score {}", score);
        }

        rank_insertion_points(&mut points, card.date_occurred);
        prop_assert!(points.iter().all(|p| p.relevance.is_some()));
    }
}
