//! Behavior-driven tests for daily series alignment
//!
//! These tests verify HOW sparse, unordered rating observations become one
//! value per calendar day.

use ratingtick_core::series::{align_ending, date_window, ratings_by_date};
use ratingtick_core::RatingPoint;
use time::macros::date;
use time::Date;

const TODAY: Date = date!(2024 - 06 - 30);

fn ratings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

// =============================================================================
// Alignment: Window Shape
// =============================================================================

#[test]
fn when_there_are_no_points_every_day_uses_fallback() {
    // Given: No observations at all

    // When: A thirty day window is aligned
    let aligned = align_ending(&[], 1500.0, 30, TODAY);

    // Then: Thirty fallback values are produced
    assert_eq!(aligned, vec![String::from("1500"); 30]);
}

#[test]
fn when_window_is_empty_nothing_is_produced() {
    let aligned = align_ending(&[RatingPoint::on(TODAY, 2000.0)], 1500.0, 0, TODAY);
    assert!(aligned.is_empty());
}

#[test]
fn output_length_always_matches_window() {
    let points = [
        RatingPoint::on(date!(2024 - 06 - 01), 1910.0),
        RatingPoint::on(date!(2024 - 06 - 29), 1930.0),
        RatingPoint::on(date!(2023 - 01 - 01), 1700.0),
        RatingPoint::on(date!(2024 - 07 - 04), 1990.0),
    ];

    for days in [1, 7, 30, 90] {
        assert_eq!(align_ending(&points, 1800.0, days, TODAY).len(), days);
    }
}

// =============================================================================
// Alignment: Gap Filling
// =============================================================================

#[test]
fn when_only_today_is_observed_earlier_days_take_that_value() {
    // Given: A single observation on the most recent day
    let points = [RatingPoint::on(TODAY, 1600.0)];

    // When: A five day window is aligned
    let aligned = align_ending(&points, 1500.0, 5, TODAY);

    // Then: Every earlier day is filled from it
    assert_eq!(aligned, vec![String::from("1600"); 5]);
}

#[test]
fn gaps_take_the_next_later_observation_not_the_previous_one() {
    // Given: Observations on days two and four of a five day window
    // (A gap is filled from the nearest *later* observation. Conventional
    // forward fill would carry 1700 into day three; this does not.)
    let points = [
        RatingPoint::on(date!(2024 - 06 - 27), 1700.0),
        RatingPoint::on(date!(2024 - 06 - 29), 1750.0),
    ];

    // When: The window is aligned
    let aligned = align_ending(&points, 1500.0, 5, TODAY);

    // Then: Day three takes day four's value and days after the last point fall back
    assert_eq!(aligned, ratings(&["1700", "1700", "1750", "1750", "1500"]));
}

#[test]
fn intervening_observations_override_later_ones() {
    let points = [
        RatingPoint::on(TODAY, 1600.0),
        RatingPoint::on(date!(2024 - 06 - 27), 1550.0),
    ];

    let aligned = align_ending(&points, 1500.0, 5, TODAY);

    assert_eq!(aligned, ratings(&["1550", "1550", "1600", "1600", "1600"]));
}

#[test]
fn unordered_points_align_the_same_as_ordered_ones() {
    let ordered = [
        RatingPoint::on(date!(2024 - 06 - 26), 1810.0),
        RatingPoint::on(date!(2024 - 06 - 28), 1820.0),
        RatingPoint::on(date!(2024 - 06 - 30), 1830.0),
    ];
    let shuffled = [ordered[2], ordered[0], ordered[1]];

    assert_eq!(
        align_ending(&ordered, 1500.0, 7, TODAY),
        align_ending(&shuffled, 1500.0, 7, TODAY)
    );
}

#[test]
fn observations_after_today_are_not_used() {
    let points = [RatingPoint::on(date!(2024 - 07 - 01), 2222.0)];

    assert_eq!(align_ending(&points, 1500.0, 2, TODAY), ratings(&["1500", "1500"]));
}

// =============================================================================
// Alignment: Zero Ratings
// =============================================================================

#[test]
fn explicit_zero_rating_is_kept_and_propagated() {
    // Given: A player whose only observed rating is exactly zero
    let points = [RatingPoint::on(date!(2024 - 06 - 29), 0.0)];

    // When: The window is aligned with a non-zero fallback
    let aligned = align_ending(&points, 1500.0, 3, TODAY);

    // Then: Zero is treated as present, not as missing
    assert_eq!(aligned, ratings(&["0", "0", "1500"]));
}

#[test]
fn zero_fallback_is_emitted_as_zero() {
    assert_eq!(align_ending(&[], 0.0, 2, TODAY), ratings(&["0", "0"]));
}

// =============================================================================
// Alignment: Idempotence
// =============================================================================

#[test]
fn aligning_dense_output_again_reproduces_it() {
    // Given: A sparse series aligned once
    let points = [
        RatingPoint::on(date!(2024 - 06 - 05), 2010.0),
        RatingPoint::on(date!(2024 - 06 - 12), 2031.5),
        RatingPoint::on(date!(2024 - 06 - 20), 0.0),
        RatingPoint::on(date!(2024 - 06 - 25), 2044.0),
    ];
    let dense = align_ending(&points, 1999.0, 30, TODAY);

    // When: Every dense value is fed back as an observation on its own day
    let replayed: Vec<RatingPoint> = date_window(30, TODAY)
        .into_iter()
        .zip(&dense)
        .map(|(day, value)| RatingPoint::on(day, value.parse().expect("numeric rating")))
        .collect();
    assert_eq!(ratings_by_date(&replayed).len(), 30);

    // Then: Alignment yields the same dense output
    assert_eq!(align_ending(&replayed, 1999.0, 30, TODAY), dense);
}
