use std::fmt::{Display, Formatter};
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::http_client::HttpError;

/// Validation and contract errors exposed by `ratingtick-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("({year}, {month}, {day}) is not a calendar date (month is zero-based)")]
    InvalidCalendarDate { year: i32, month: u8, day: u8 },
}

/// Discriminant for [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Api,
    Network,
    RateLimited,
    Validation,
}

impl FetchErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Api => "fetch.api",
            Self::Network => "fetch.network",
            Self::RateLimited => "fetch.rate_limited",
            Self::Validation => "fetch.validation",
        }
    }
}

impl Display for FetchErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Underlying cause of a [`FetchError::Network`] failure.
#[derive(Debug, Error)]
pub enum NetworkCause {
    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("response body is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Failure of one logical fetch, after any retries were spent.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {endpoint}")]
    Api { status: u16, endpoint: String },

    #[error("failed to fetch {endpoint} after {attempts} attempts: {cause}")]
    Network {
        endpoint: String,
        attempts: u32,
        #[source]
        cause: NetworkCause,
    },

    #[error("rate limit exceeded for {endpoint}; retry after {}ms", retry_after.as_millis())]
    RateLimited {
        endpoint: String,
        retry_after: Duration,
    },

    #[error("invalid response format from {endpoint}: {reason}")]
    Validation {
        endpoint: String,
        reason: String,
        payload: Value,
    },
}

impl FetchError {
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Api { .. } => FetchErrorKind::Api,
            Self::Network { .. } => FetchErrorKind::Network,
            Self::RateLimited { .. } => FetchErrorKind::RateLimited,
            Self::Validation { .. } => FetchErrorKind::Validation,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            Self::Api { endpoint, .. }
            | Self::Network { endpoint, .. }
            | Self::RateLimited { endpoint, .. }
            | Self::Validation { endpoint, .. } => endpoint,
        }
    }

    /// HTTP status for [`FetchError::Api`] failures.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-suggested wait for [`FetchError::RateLimited`] failures.
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Decoded payload that failed schema validation.
    pub const fn payload(&self) -> Option<&Value> {
        match self {
            Self::Validation { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
