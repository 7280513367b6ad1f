//! # Domain Models
//!
//! Rating types decoded from the remote API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RatingPoint`] | One `(year, zero-based month, day, rating)` observation |
//! | [`RatingSeries`] | Named per-category list of points |
//! | [`PlayerRecord`] | Ranked player with current classical rating |
//!
//! Points are plain calendar dates. Nothing here converts between time zones.

mod player;
mod rating;

pub use player::{PlayerRecord, DEFAULT_RATING};
pub use rating::{RatingPoint, RatingSeries, CLASSICAL};
