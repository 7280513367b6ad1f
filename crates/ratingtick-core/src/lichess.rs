//! Typed client for the Lichess leaderboard and rating-history endpoints.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{PlayerRecord, RatingSeries};
use crate::error::FetchError;
use crate::fetcher::ResilientFetcher;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::retry::RetryConfig;

pub const LICHESS_API_BASE: &str = "https://lichess.org/api";

/// Leaderboard size requested by default.
pub const DEFAULT_TOP_PLAYERS: usize = 50;

#[derive(Debug, Deserialize)]
struct TopPlayersResponse {
    users: Vec<PlayerRecord>,
}

/// Lichess API client built on a [`ResilientFetcher`].
#[derive(Clone)]
pub struct LichessClient {
    fetcher: ResilientFetcher,
    base_url: String,
}

impl Default for LichessClient {
    fn default() -> Self {
        Self::new(
            Arc::new(ReqwestHttpClient::default()),
            LICHESS_API_BASE,
            RetryConfig::default(),
        )
    }
}

impl LichessClient {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        retry: RetryConfig,
    ) -> Self {
        Self::with_fetcher(ResilientFetcher::new(http_client, retry), base_url)
    }

    pub fn with_fetcher(fetcher: ResilientFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn top_players_url(&self, count: usize) -> String {
        format!("{}/player/top/{count}/classical", self.base_url)
    }

    pub fn rating_history_url(&self, username: &str) -> String {
        format!(
            "{}/user/{}/rating-history",
            self.base_url,
            urlencoding::encode(username)
        )
    }

    /// Top `count` players of the classical leaderboard, in ranking order.
    pub async fn top_classical_players(&self, count: usize) -> Result<Vec<PlayerRecord>, FetchError> {
        let response: TopPlayersResponse = self.fetcher.fetch(&self.top_players_url(count)).await?;
        debug!(count = response.users.len(), "fetched classical leaderboard");
        Ok(response.users)
    }

    /// Every rating category recorded for `username`.
    pub async fn rating_history(&self, username: &str) -> Result<Vec<RatingSeries>, FetchError> {
        self.fetcher.fetch(&self.rating_history_url(username)).await
    }

    /// The Classical series for `username`, or `None` if the player has none.
    pub async fn classical_history(&self, username: &str) -> Result<Option<RatingSeries>, FetchError> {
        let history = self.rating_history(username).await?;
        Ok(RatingSeries::classical(history))
    }
}
