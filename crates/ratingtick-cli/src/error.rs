use ratingtick_core::{FetchError, FetchErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to format export timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Fetch(error) => match error.kind() {
                FetchErrorKind::Api => 2,
                FetchErrorKind::Network => 3,
                FetchErrorKind::RateLimited => 4,
                FetchErrorKind::Validation => 5,
            },
            Self::Io(_) => 10,
            Self::Csv(_) | Self::Timestamp(_) => 1,
        }
    }
}
