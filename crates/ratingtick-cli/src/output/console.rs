use std::collections::BTreeMap;

use ratingtick_core::PlayerRecord;
use serde_json::{Map, Number, Value};
use time::Date;

/// Numbered leaderboard lines, best player first.
pub fn leaderboard_lines(players: &[PlayerRecord]) -> Vec<String> {
    players
        .iter()
        .enumerate()
        .map(|(index, player)| {
            let title = player
                .title
                .as_deref()
                .map(|title| format!("{title} "))
                .unwrap_or_default();
            match player.rating {
                Some(rating) => format!("{}. {title}{} ({rating})", index + 1, player.username),
                None => format!("{}. {title}{}", index + 1, player.username),
            }
        })
        .collect()
}

/// `username, {"YYYY-MM-DD": rating, ...}` for the console summary.
pub fn history_line(username: &str, ratings: &BTreeMap<Date, f64>) -> String {
    let map: Map<String, Value> = ratings
        .iter()
        .map(|(date, rating)| (date.to_string(), rating_value(*rating)))
        .collect();
    format!("{username}, {}", Value::Object(map))
}

fn rating_value(rating: f64) -> Value {
    if rating.fract() == 0.0 && rating.abs() < 1e15 {
        Value::from(rating as i64)
    } else {
        Number::from_f64(rating).map_or(Value::Null, Value::Number)
    }
}
