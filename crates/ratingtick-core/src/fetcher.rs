//! Resilient JSON fetching over an [`HttpClient`].
//!
//! Three failure classes get three policies:
//! - `429` retries on the server's own cadence (`Retry-After`, else the base delay)
//! - transport and JSON syntax failures retry with exponential backoff plus jitter
//! - any other non-2xx status and schema mismatches fail on the spot

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FetchError, NetworkCause};
use crate::http_client::{HttpClient, HttpRequest};
use crate::retry::RetryConfig;

/// Issues GET requests, retries transient failures, and decodes the body into a
/// schema type.
#[derive(Clone)]
pub struct ResilientFetcher {
    http_client: Arc<dyn HttpClient>,
    config: RetryConfig,
}

impl ResilientFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, config: RetryConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Fetch `url` and decode the JSON body as `T`.
    ///
    /// At most `max_retries + 1` requests are issued. The returned error is the
    /// one produced by the last attempt.
    pub async fn fetch<T>(&self, url: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let total_attempts = self.config.max_retries.saturating_add(1);
        let mut attempt: u32 = 0;

        loop {
            let request = HttpRequest::get(url)
                .with_header("accept", "application/json")
                .with_timeout_ms(self.config.timeout_ms);

            debug!(url, attempt = attempt + 1, total_attempts, "sending GET request");

            let cause = match self.http_client.execute(request).await {
                Ok(response) if response.is_too_many_requests() => {
                    let retry_after = self.config.rate_limit_delay(response.retry_after());

                    if self.config.is_final_attempt(attempt) {
                        return Err(FetchError::RateLimited {
                            endpoint: url.to_owned(),
                            retry_after,
                        });
                    }

                    warn!(
                        "Rate limited by {} on attempt {}/{}; retrying in {}ms",
                        url,
                        attempt + 1,
                        total_attempts,
                        retry_after.as_millis()
                    );
                    tokio::time::sleep(retry_after).await;
                    attempt += 1;
                    continue;
                }
                Ok(response) if !response.is_success() => {
                    return Err(FetchError::Api {
                        status: response.status,
                        endpoint: url.to_owned(),
                    });
                }
                Ok(response) => match serde_json::from_str::<Value>(&response.body) {
                    Ok(payload) => return decode(url, payload),
                    Err(error) => NetworkCause::MalformedJson(error),
                },
                Err(error) => NetworkCause::Transport(error),
            };

            if self.config.is_final_attempt(attempt) {
                return Err(FetchError::Network {
                    endpoint: url.to_owned(),
                    attempts: attempt + 1,
                    cause,
                });
            }

            let delay = self.config.delay_for_attempt(attempt);
            warn!(
                "Attempt {}/{} for {} failed: {}; retrying in {}ms",
                attempt + 1,
                total_attempts,
                url,
                cause,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

fn decode<T>(endpoint: &str, payload: Value) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    match T::deserialize(&payload) {
        Ok(value) => Ok(value),
        Err(error) => Err(FetchError::Validation {
            endpoint: endpoint.to_owned(),
            reason: error.to_string(),
            payload,
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::error::FetchErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        name: String,
    }

    #[test]
    fn decode_keeps_payload_on_schema_mismatch() {
        let payload = serde_json::json!({ "name": 42 });

        let error = decode::<Probe>("https://lichess.test/probe", payload.clone())
            .expect_err("number is not a string");

        assert_eq!(error.kind(), FetchErrorKind::Validation);
        assert_eq!(error.payload(), Some(&payload));
    }

    #[test]
    fn decode_accepts_matching_payload() {
        let probe = decode::<Probe>("https://lichess.test/probe", serde_json::json!({ "name": "ok" }))
            .expect("matches schema");
        assert_eq!(probe.name, "ok");
    }
}
