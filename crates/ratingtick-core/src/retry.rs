//! Retry policy with exponential backoff and additive jitter.

use std::time::Duration;

/// Exponential backoff for transport failures.
///
/// The delay for attempt `n` (0-based) is `base * factor^n + jitter`, where
/// `jitter` is drawn uniformly from `[0, max_jitter)`, and the sum is capped
/// at `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    pub base: Duration,
    pub factor: f64,
    pub max: Duration,
    pub max_jitter: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(1_000),
            factor: 2.0,
            max: Duration::from_millis(10_000),
            max_jitter: Duration::from_millis(1_000),
        }
    }
}

impl Backoff {
    /// Calculate the delay for a given retry attempt with a random jitter.
    pub fn delay(self, attempt: u32) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(fastrand::u64(0..jitter_ms))
        };
        self.delay_with_jitter(attempt, jitter)
    }

    /// Calculate the delay for a given retry attempt with an explicit jitter.
    pub fn delay_with_jitter(self, attempt: u32, jitter: Duration) -> Duration {
        let scale = self.factor.powi(attempt.min(i32::MAX as u32) as i32);
        let seconds = self.base.as_secs_f64() * scale;
        if !seconds.is_finite() || seconds >= self.max.as_secs_f64() {
            return self.max;
        }
        Duration::from_secs_f64(seconds)
            .saturating_add(jitter)
            .min(self.max)
    }
}

/// Configuration for the fetcher's retry loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Backoff used after transport failures. Its `base` is also the wait
    /// after a `429` that carries no usable `Retry-After`.
    pub backoff: Backoff,
    /// Per-request transport timeout.
    pub timeout_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Backoff::default(),
            timeout_ms: 10_000,
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            backoff: Backoff {
                base: base_delay,
                ..Backoff::default()
            },
            ..Self::default()
        }
    }

    /// Single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub const fn base_delay(&self) -> Duration {
        self.backoff.base
    }

    pub const fn is_final_attempt(&self, attempt: u32) -> bool {
        attempt >= self.max_retries
    }

    /// Delay before retrying after a transport failure on `attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }

    /// Delay before retrying after a `429`, preferring the server's hint.
    pub fn rate_limit_delay(&self, server_hint: Option<Duration>) -> Duration {
        server_hint.unwrap_or(self.backoff.base)
    }
}
