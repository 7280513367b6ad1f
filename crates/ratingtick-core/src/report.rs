//! Builds the daily rating table for the classical leaderboard.

use std::collections::BTreeMap;

use time::Date;
use tracing::{info, warn};

use crate::domain::{PlayerRecord, RatingSeries};
use crate::error::FetchError;
use crate::lichess::{LichessClient, DEFAULT_TOP_PLAYERS};
use crate::scheduler::RateLimitedScheduler;
use crate::series;

/// Days covered by the exported grid unless configured otherwise.
pub const DEFAULT_WINDOW_DAYS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub top_players: usize,
    pub days: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_players: DEFAULT_TOP_PLAYERS,
            days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// One exported line: a username followed by one rating per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRow {
    pub username: String,
    pub ratings: Vec<String>,
}

impl RatingRow {
    pub fn to_record(&self) -> Vec<String> {
        std::iter::once(self.username.clone())
            .chain(self.ratings.iter().cloned())
            .collect()
    }
}

/// A player whose history could not be fetched.
#[derive(Debug)]
pub struct PlayerFailure {
    pub username: String,
    pub error: FetchError,
}

/// Aligned ratings for every player that produced a Classical series.
#[derive(Debug, Default)]
pub struct RatingTable {
    pub headers: Vec<String>,
    pub rows: Vec<RatingRow>,
    /// Players without a Classical series.
    pub missing: Vec<String>,
    pub failures: Vec<PlayerFailure>,
}

/// Drives leaderboard and per-player history fetches through the scheduler.
#[derive(Clone)]
pub struct RatingReport {
    client: LichessClient,
    scheduler: RateLimitedScheduler,
    config: ReportConfig,
}

impl RatingReport {
    pub fn new(client: LichessClient, scheduler: RateLimitedScheduler, config: ReportConfig) -> Self {
        Self {
            client,
            scheduler,
            config,
        }
    }

    pub fn config(&self) -> ReportConfig {
        self.config
    }

    pub async fn top_players(&self) -> Result<Vec<PlayerRecord>, FetchError> {
        info!("Fetching top {} classical players...", self.config.top_players);
        self.client.top_classical_players(self.config.top_players).await
    }

    /// Classical series for `player`, or `None` when the category is absent.
    pub async fn history_for(&self, player: &PlayerRecord) -> Result<Option<RatingSeries>, FetchError> {
        self.client.classical_history(&player.username).await
    }

    /// In-window Classical ratings for `player` keyed by date, or `None` when
    /// the player has no Classical series.
    pub async fn recent_history(
        &self,
        player: &PlayerRecord,
        today: Date,
    ) -> Result<Option<BTreeMap<Date, f64>>, FetchError> {
        let Some(history) = self.history_for(player).await? else {
            return Ok(None);
        };

        let recent = series::within_window(&history.points, self.config.days, today);
        Ok(Some(series::ratings_by_date(&recent)))
    }

    /// Build the table for the window ending today (UTC).
    pub async fn build(&self, players: &[PlayerRecord]) -> RatingTable {
        self.build_ending(players, series::today()).await
    }

    /// Build the table for the window ending on `today`.
    ///
    /// Every player is fetched through the scheduler. A failed or missing
    /// history drops that player's row and leaves the others untouched. Rows
    /// keep the order of `players`.
    pub async fn build_ending(&self, players: &[PlayerRecord], today: Date) -> RatingTable {
        let days = self.config.days;

        let handles: Vec<_> = players
            .iter()
            .cloned()
            .map(|player| {
                let client = self.client.clone();
                let username = player.username.clone();
                let handle = self.scheduler.submit(async move {
                    info!("Processing {}...", player.username);
                    let history = client.classical_history(&player.username).await?;
                    Ok::<_, FetchError>(history.map(|history| {
                        let recent = series::within_window(&history.points, days, today);
                        RatingRow {
                            username: player.username.clone(),
                            ratings: series::align_ending(
                                &recent,
                                player.fallback_rating(),
                                days,
                                today,
                            ),
                        }
                    }))
                });
                (username, handle)
            })
            .collect();

        let mut table = RatingTable {
            headers: series::date_headers(days, today),
            ..RatingTable::default()
        };

        for (username, handle) in handles {
            match handle.await {
                Ok(Some(row)) => table.rows.push(row),
                Ok(None) => {
                    warn!("{username} has no classical rating history; skipping");
                    table.missing.push(username);
                }
                Err(error) => {
                    warn!("Failed to process {username}: {error}");
                    table.failures.push(PlayerFailure { username, error });
                }
            }
        }

        table
    }
}
