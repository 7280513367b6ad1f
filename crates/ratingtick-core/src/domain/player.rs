use serde::Deserialize;

use crate::ValidationError;

/// Rating used when a player carries no classical rating at all.
pub const DEFAULT_RATING: f64 = 1500.0;

/// Ranked player as returned by the leaderboard endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PlayerPayload")]
pub struct PlayerRecord {
    pub id: String,
    pub username: String,
    pub title: Option<String>,
    pub rating: Option<f64>,
}

impl PlayerRecord {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        rating: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }

        Ok(Self {
            id: id.into(),
            username,
            title: None,
            rating,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Value used for days with no observed rating.
    pub fn fallback_rating(&self) -> f64 {
        self.rating.unwrap_or(DEFAULT_RATING)
    }
}

#[derive(Deserialize)]
struct PlayerPayload {
    id: String,
    username: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    perfs: PerfsPayload,
}

#[derive(Default, Deserialize)]
struct PerfsPayload {
    #[serde(default)]
    classical: Option<PerfPayload>,
}

#[derive(Deserialize)]
struct PerfPayload {
    rating: f64,
}

impl TryFrom<PlayerPayload> for PlayerRecord {
    type Error = ValidationError;

    fn try_from(payload: PlayerPayload) -> Result<Self, Self::Error> {
        let record = Self::new(
            payload.id,
            payload.username,
            payload.perfs.classical.map(|perf| perf.rating),
        )?;

        Ok(match payload.title {
            Some(title) => record.with_title(title),
            None => record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_leaderboard_entry() {
        let player: PlayerRecord = serde_json::from_str(
            r#"{"id":"alice","username":"Alice","title":"GM","perfs":{"classical":{"rating":2480,"progress":12}}}"#,
        )
        .expect("valid entry");

        assert_eq!(player.username, "Alice");
        assert_eq!(player.title.as_deref(), Some("GM"));
        assert_eq!(player.fallback_rating(), 2480.0);
    }

    #[test]
    fn missing_classical_perf_falls_back_to_default() {
        let player: PlayerRecord =
            serde_json::from_str(r#"{"id":"bob","username":"Bob","perfs":{}}"#).expect("valid entry");

        assert_eq!(player.rating, None);
        assert_eq!(player.fallback_rating(), DEFAULT_RATING);
    }

    #[test]
    fn zero_rating_is_kept() {
        let player = PlayerRecord::new("z", "Zero", Some(0.0)).expect("valid");
        assert_eq!(player.fallback_rating(), 0.0);
    }

    #[test]
    fn empty_username_is_rejected() {
        let error = serde_json::from_str::<PlayerRecord>(r#"{"id":"x","username":"  "}"#)
            .expect_err("blank username");
        assert!(error.to_string().contains("username cannot be empty"));
    }
}
