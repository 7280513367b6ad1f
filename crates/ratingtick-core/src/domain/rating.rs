use serde::Deserialize;
use time::{Date, Month};

use crate::ValidationError;

/// Name of the only rating category reported downstream.
pub const CLASSICAL: &str = "Classical";

/// One observed rating on one calendar date.
///
/// Decodes from the API's `[year, month, day, rating]` arrays. `month` is
/// zero-based: 0 is January, 11 is December.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RatingPoint {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub rating: f64,
}

impl RatingPoint {
    pub const fn new(year: i32, month: u8, day: u8, rating: f64) -> Self {
        Self {
            year,
            month,
            day,
            rating,
        }
    }

    pub fn on(date: Date, rating: f64) -> Self {
        Self::new(date.year(), u8::from(date.month()) - 1, date.day(), rating)
    }

    pub fn date(&self) -> Result<Date, ValidationError> {
        let invalid = || ValidationError::InvalidCalendarDate {
            year: self.year,
            month: self.month,
            day: self.day,
        };

        let month = self
            .month
            .checked_add(1)
            .and_then(|month| Month::try_from(month).ok())
            .ok_or_else(invalid)?;

        Date::from_calendar_date(self.year, month, self.day).map_err(|_| invalid())
    }
}

/// Rating history for one category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatingSeries {
    pub name: String,
    pub points: Vec<RatingPoint>,
}

impl RatingSeries {
    pub fn is_classical(&self) -> bool {
        self.name == CLASSICAL
    }

    /// Pick the Classical series out of a player's full history.
    pub fn classical(series: impl IntoIterator<Item = Self>) -> Option<Self> {
        series.into_iter().find(Self::is_classical)
    }
}
