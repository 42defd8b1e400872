//! Retry governor
//!
//! Wraps one logical call, classifies every failed attempt by HTTP status and
//! decides whether to fail, wait and retry, or throttle.
//!
//! | Outcome          | Action                                             |
//! |------------------|----------------------------------------------------|
//! | 2xx              | feed the throttle, return                          |
//! | 401              | `Error::Authentication`, never retried             |
//! | 429              | wait `reset + 1`s (or 60s), counted retry          |
//! | 429, exhausted   | `Error::RateLimitExhausted`                        |
//! | 5xx              | wait 2s, retry without counting                    |
//! | anything else    | `Error::Request`                                   |

use super::rate_limit::{parse_header_u64, Pacer, RateLimitSnapshot, Throttle, HEADER_RESET};
use super::request::ApiResponse;
use super::transport::TransportError;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info};

/// Tunable retry behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Rate-limit retries allowed before giving up
    pub max_attempts: u32,
    /// Seconds added to the server's reset hint
    pub rate_limit_padding_secs: u64,
    /// Wait used when the reset hint is absent or zero
    pub rate_limit_fallback_secs: u64,
    /// Fixed spacing between 5xx retries
    pub server_error_delay_ms: u64,
    /// Cap on 5xx retries; `None` retries for as long as the server keeps failing
    pub max_server_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            rate_limit_padding_secs: 1,
            rate_limit_fallback_secs: 60,
            server_error_delay_ms: 2000,
            max_server_retries: None,
        }
    }
}

impl RetryPolicy {
    /// How long to wait after a 429 with the given reset hint
    pub fn rate_limit_delay(&self, reset_seconds: Option<u64>) -> Duration {
        match reset_seconds {
            Some(reset) if reset > 0 => {
                Duration::from_secs(reset.saturating_add(self.rate_limit_padding_secs))
            }
            _ => Duration::from_secs(self.rate_limit_fallback_secs),
        }
    }

    pub fn server_error_delay(&self) -> Duration {
        Duration::from_millis(self.server_error_delay_ms)
    }
}

/// Classification of one failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unauthorized,
    RateLimited { reset_seconds: Option<u64> },
    ServerError { status: u16 },
    Fatal,
}

/// Classify a transport failure
pub fn classify(err: &TransportError) -> Outcome {
    match err {
        TransportError::Status {
            status, headers, ..
        } => match *status {
            401 => Outcome::Unauthorized,
            429 => Outcome::RateLimited {
                reset_seconds: parse_header_u64(headers, HEADER_RESET),
            },
            500..=599 => Outcome::ServerError { status: *status },
            _ => Outcome::Fatal,
        },
        _ => Outcome::Fatal,
    }
}

/// Per-call retry bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    /// Rate-limit retries consumed so far
    pub attempt: u32,
    pub max_attempts: u32,
    /// 5xx retries consumed so far (not counted against `max_attempts`)
    pub server_retries: u32,
}

impl RetryState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            server_retries: 0,
        }
    }

    pub fn can_retry_rate_limit(&self) -> bool {
        self.attempt < self.max_attempts
    }
}

/// Drives one logical call to success or terminal failure
#[derive(Debug, Clone, Default)]
pub struct RetryGovernor {
    policy: RetryPolicy,
    throttle: Throttle,
    pacer: Option<Pacer>,
}

impl RetryGovernor {
    pub fn new(policy: RetryPolicy, throttle: Throttle) -> Self {
        Self {
            policy,
            throttle,
            pacer: None,
        }
    }

    /// Space attempts out with a local token bucket
    #[must_use]
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = Some(pacer);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `attempt` until it succeeds or fails terminally
    ///
    /// Each invocation of `attempt` must perform exactly one transport call.
    /// `label` identifies the call in log output.
    pub async fn execute<F, Fut>(&self, label: &str, mut attempt: F) -> Result<ApiResponse>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<ApiResponse, TransportError>>,
    {
        let mut state = RetryState::new(self.policy.max_attempts);

        loop {
            if let Some(ref pacer) = self.pacer {
                pacer.wait().await;
            }

            let err = match attempt().await {
                Ok(response) => {
                    debug!(request = label, status = response.status, "Request succeeded");
                    if let Some(snapshot) = RateLimitSnapshot::from_headers(&response.headers) {
                        self.throttle.maybe_throttle(&snapshot).await;
                    }
                    return Ok(response);
                }
                Err(err) => err,
            };

            match classify(&err) {
                Outcome::Unauthorized => {
                    error!(request = label, "Unauthorized, incorrect API key");
                    return Err(Error::Authentication {
                        message: err.upstream_message().unwrap_or("HTTP 401").to_string(),
                    });
                }
                Outcome::ServerError { status } => {
                    error!(request = label, status, "Upstream responded with server error");
                    if let Some(cap) = self.policy.max_server_retries {
                        if state.server_retries >= cap {
                            return Err(Error::ServerError {
                                status,
                                message: err.upstream_message().unwrap_or_default().to_string(),
                                retries: state.server_retries,
                            });
                        }
                    }
                    state.server_retries += 1;
                    tokio::time::sleep(self.policy.server_error_delay()).await;
                }
                Outcome::RateLimited { reset_seconds } if state.can_retry_rate_limit() => {
                    let delay = self.policy.rate_limit_delay(reset_seconds);
                    state.attempt += 1;
                    info!(
                        request = label,
                        attempt = state.attempt,
                        max_attempts = state.max_attempts,
                        delay_secs = delay.as_secs(),
                        "Request limit exceeded, retrying {}/{} in {} seconds",
                        state.attempt,
                        state.max_attempts,
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                }
                Outcome::RateLimited { reset_seconds } => {
                    error!(
                        request = label,
                        attempts = state.attempt,
                        "Rate limit retries exhausted"
                    );
                    return Err(Error::RateLimitExhausted {
                        attempts: state.attempt,
                        reset_seconds,
                    });
                }
                Outcome::Fatal => {
                    error!(
                        request = label,
                        retries = state.attempt,
                        error = %err,
                        "Request failed"
                    );
                    return Err(Error::request(err));
                }
            }
        }
    }
}
