//! HTTP module
//!
//! The request-execution core and its transport boundary.
//!
//! # Features
//!
//! - **Retry Governor**: 401 fails fast, 429 waits for the reset hint, 5xx retries
//! - **Rate-Limit Throttle**: proactive random slow-down from `x-ratelimit-*` headers
//! - **Pacing**: optional local token bucket using governor
//! - **Dry Run**: mutations are logged and skipped

mod client;
mod query;
mod rate_limit;
mod request;
mod retry;
mod transport;

pub use client::ApiClient;
pub use query::stringify;
pub use rate_limit::{
    DelayWindow, Pacer, PacingConfig, RateLimitSnapshot, Throttle, ThrottleConfig,
    HEADER_REMAINING, HEADER_RESET,
};
pub use request::{ApiRequest, ApiResponse, QueryParams};
pub use retry::{classify, Outcome, RetryGovernor, RetryPolicy, RetryState};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportRequest};
