//! CLI argument definitions for ratingtick.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `https://lichess.org/api` | API root |
//! | `--top` | `50` | Leaderboard size |
//! | `--days` | `30` | Days in the exported grid |
//! | `--max-concurrent` | `5` | History requests in flight |
//! | `--min-spacing-ms` | `200` | Pause after each completed request |
//! | `--max-retries` | `3` | Retries per request |
//! | `--base-delay-ms` | `1000` | Initial backoff delay |
//! | `--timeout-ms` | `10000` | Per-request timeout |
//! | `--output-dir` | `dist` | Directory for the CSV file |
//!
//! # Examples
//!
//! ```bash
//! # Export the top 50 classical players over the last 30 days
//! ratingtick
//!
//! # A gentler run over a shorter window
//! ratingtick --top 10 --days 7 --max-concurrent 2 --min-spacing-ms 500
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratingtick_core::{ReportConfig, RetryConfig, SchedulerConfig, LICHESS_API_BASE};

/// ♟️ ratingtick - daily classical rating grid for the Lichess leaderboard
///
/// Fetches the classical leaderboard, then every player's rating history
/// under a rate limit, and writes one CSV row per player with one rating
/// per day.
#[derive(Debug, Parser)]
#[command(name = "ratingtick", author, version, about = "Daily classical rating grid for the Lichess leaderboard")]
pub struct Cli {
    /// API root URL.
    #[arg(long, default_value = LICHESS_API_BASE)]
    pub base_url: String,

    /// Number of leaderboard players to export.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(1..=200))]
    pub top: u16,

    /// Number of calendar days in the grid, ending today (UTC).
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..))]
    pub days: u16,

    /// Maximum rating-history requests in flight.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_concurrent: u16,

    /// Pause after each completed request before the next may start.
    #[arg(long, default_value_t = 200)]
    pub min_spacing_ms: u64,

    /// Retries per request after the first attempt.
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Initial backoff delay; also the wait after a 429 without Retry-After.
    #[arg(long, default_value_t = 1000)]
    pub base_delay_ms: u64,

    /// Per-request timeout.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Directory the CSV file is written to.
    #[arg(long, default_value = "dist")]
    pub output_dir: PathBuf,

    /// Skip printing the top player's recent rating history.
    #[arg(long, default_value_t = false)]
    pub no_history: bool,
}

impl Cli {
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(self.max_retries, Duration::from_millis(self.base_delay_ms))
            .with_timeout_ms(self.timeout_ms)
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::new(
            usize::from(self.max_concurrent),
            Duration::from_millis(self.min_spacing_ms),
        )
    }

    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            top_players: usize::from(self.top),
            days: usize::from(self.days),
        }
    }
}
