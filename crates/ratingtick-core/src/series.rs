//! Alignment of sparse rating observations onto a dense daily grid.
//!
//! The grid covers the `days` most recent calendar days ending on `today`,
//! oldest first. A day with no observation takes the next observed rating
//! later in the window; if nothing later was observed it takes the fallback.

use std::collections::BTreeMap;

use time::{Date, Duration, OffsetDateTime};
use tracing::warn;

use crate::domain::RatingPoint;

/// First header cell of every exported table.
pub const USERNAME_HEADER: &str = "username";

/// Current calendar date in UTC.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// The `days` calendar days ending on `today`, oldest first.
pub fn date_window(days: usize, today: Date) -> Vec<Date> {
    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub(Duration::days(offset as i64)))
        .collect()
}

/// `["username", "YYYY-MM-DD", ...]` in the same order [`align`] emits values.
pub fn date_headers(days: usize, today: Date) -> Vec<String> {
    std::iter::once(String::from(USERNAME_HEADER))
        .chain(date_window(days, today).iter().map(Date::to_string))
        .collect()
}

/// Drop points dated before the first day of the window.
pub fn within_window(points: &[RatingPoint], days: usize, today: Date) -> Vec<RatingPoint> {
    let Some(&first_day) = date_window(days, today).first() else {
        return Vec::new();
    };

    points
        .iter()
        .filter(|point| point.date().is_ok_and(|date| date >= first_day))
        .copied()
        .collect()
}

/// Map each observed calendar date to its rating. A later point for the same
/// date replaces an earlier one; points with impossible dates are skipped.
pub fn ratings_by_date(points: &[RatingPoint]) -> BTreeMap<Date, f64> {
    let mut by_date = BTreeMap::new();
    for point in points {
        match point.date() {
            Ok(date) => {
                by_date.insert(date, point.rating);
            }
            Err(error) => warn!("skipping rating point: {error}"),
        }
    }
    by_date
}

/// Align `points` onto the `days` calendar days ending today (UTC).
pub fn align(points: &[RatingPoint], fallback: f64, days: usize) -> Vec<String> {
    align_ending(points, fallback, days, today())
}

/// Align `points` onto the `days` calendar days ending on `today`.
///
/// Always returns exactly `days` entries, oldest day first.
pub fn align_ending(points: &[RatingPoint], fallback: f64, days: usize, today: Date) -> Vec<String> {
    let by_date = ratings_by_date(points);
    let window = date_window(days, today);

    // Walk newest to oldest so each gap sees the nearest later observation.
    let mut next_known: Option<f64> = None;
    let mut aligned: Vec<f64> = window
        .iter()
        .rev()
        .map(|date| {
            if let Some(&rating) = by_date.get(date) {
                next_known = Some(rating);
            }
            next_known.unwrap_or(fallback)
        })
        .collect();
    aligned.reverse();

    aligned.into_iter().map(format_rating).collect()
}

fn format_rating(rating: f64) -> String {
    rating.to_string()
}
