//! # Ratingtick Core
//!
//! Rate-limited retrieval of chess rating histories and their alignment onto a
//! daily calendar grid.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Rating points, series and ranked players |
//! | [`error`] | Fetch error taxonomy and validation errors |
//! | [`fetcher`] | Retrying, schema-validating JSON fetcher |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`lichess`] | Leaderboard and rating-history client |
//! | [`report`] | Builds the per-player daily rating table |
//! | [`retry`] | Backoff and retry configuration |
//! | [`scheduler`] | Bounded-concurrency scheduler with spacing |
//! | [`series`] | Daily alignment and gap filling |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ratingtick_core::{LichessClient, RateLimitedScheduler, RatingReport, ReportConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = RatingReport::new(
//!         LichessClient::default(),
//!         RateLimitedScheduler::default(),
//!         ReportConfig::default(),
//!     );
//!
//!     let players = report.top_players().await?;
//!     let table = report.build(&players).await;
//!     println!("{}", table.headers.join(","));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  RatingReport   │
//! └────────┬────────┘
//!          │ submit
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │    Scheduler    │────▶│  LichessClient   │
//! └─────────────────┘     └────────┬─────────┘
//!                                  ▼
//!                         ┌──────────────────┐     ┌──────────────┐
//!                         │ ResilientFetcher │────▶│  HttpClient  │
//!                         └──────────────────┘     └──────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use ratingtick_core::{FetchError, FetchErrorKind};
//!
//! fn describe(error: &FetchError) -> &'static str {
//!     match error.kind() {
//!         FetchErrorKind::Api => "upstream rejected the request",
//!         FetchErrorKind::Network => "upstream unreachable",
//!         FetchErrorKind::RateLimited => "slow down",
//!         FetchErrorKind::Validation => "unexpected payload",
//!     }
//! }
//! ```

pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod lichess;
pub mod report;
pub mod retry;
pub mod scheduler;
pub mod series;

pub use domain::{PlayerRecord, RatingPoint, RatingSeries, CLASSICAL, DEFAULT_RATING};
pub use error::{FetchError, FetchErrorKind, NetworkCause, ValidationError};
pub use fetcher::ResilientFetcher;
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, RecordedCall, ReqwestHttpClient,
    ScriptedHttpClient,
};
pub use lichess::{LichessClient, DEFAULT_TOP_PLAYERS, LICHESS_API_BASE};
pub use report::{
    PlayerFailure, RatingReport, RatingRow, RatingTable, ReportConfig, DEFAULT_WINDOW_DAYS,
};
pub use retry::{Backoff, RetryConfig};
pub use scheduler::{RateLimitedScheduler, SchedulerConfig, TaskHandle};
pub use series::{align, align_ending, date_headers, date_window};
