//! Rate limiting
//!
//! Two independent mechanisms live here:
//!
//! - [`Throttle`] reads the upstream's `x-ratelimit-*` headers after every
//!   successful call and sleeps a random interval when the budget runs low.
//! - [`Pacer`] is an optional local token bucket (governor) that spaces out
//!   attempts before they reach the transport. It is off unless configured.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Requests left in the current window
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
/// Seconds until the window resets
pub const HEADER_RESET: &str = "x-ratelimit-reset";

// ============================================================================
// Snapshot
// ============================================================================

/// Rate-limit budget reported by one response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub remaining: u64,
    pub reset_seconds: u64,
}

impl RateLimitSnapshot {
    /// Read the budget from lower-cased response headers
    ///
    /// Without a `remaining` header there is nothing to act on; a missing
    /// `reset` header reads as zero.
    pub fn from_headers(headers: &HashMap<String, String>) -> Option<Self> {
        let remaining = parse_header_u64(headers, HEADER_REMAINING)?;
        let reset_seconds = parse_header_u64(headers, HEADER_RESET).unwrap_or(0);
        Some(Self {
            remaining,
            reset_seconds,
        })
    }
}

/// Parse a numeric header, accepting fractional values by truncation
pub(crate) fn parse_header_u64(headers: &HashMap<String, String>, name: &str) -> Option<u64> {
    let raw = headers.get(name)?.trim();
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
    })
}

// ============================================================================
// Throttle
// ============================================================================

/// Inclusive range of milliseconds to pick a random sleep from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayWindow {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayWindow {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Pick a uniformly random duration inside the window
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let (lo, hi) = if self.min_ms <= self.max_ms {
            (self.min_ms, self.max_ms)
        } else {
            (self.max_ms, self.min_ms)
        };
        Duration::from_millis(rng.gen_range(lo..=hi))
    }
}

/// Thresholds for proactive slow-down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Slow down when fewer requests than this remain...
    pub slow_below: u64,
    /// ...and the window still has more than this many seconds to run
    pub slow_reset_above: u64,
    pub slow_window: DelayWindow,
    /// Critical budget: always back off below this
    pub critical_below: u64,
    pub critical_window: DelayWindow,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            slow_below: 60,
            slow_reset_above: 30,
            slow_window: DelayWindow::new(1000, 3000),
            critical_below: 20,
            critical_window: DelayWindow::new(1000, 5000),
        }
    }
}

/// Header-driven proactive throttle
#[derive(Debug, Clone, Default)]
pub struct Throttle {
    config: ThrottleConfig,
}

impl Throttle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Window to sleep in for this snapshot, if any
    ///
    /// The critical window supersedes the slow one when both match.
    pub fn window_for(&self, snapshot: &RateLimitSnapshot) -> Option<DelayWindow> {
        if snapshot.remaining < self.config.critical_below {
            Some(self.config.critical_window)
        } else if snapshot.remaining < self.config.slow_below
            && snapshot.reset_seconds > self.config.slow_reset_above
        {
            Some(self.config.slow_window)
        } else {
            None
        }
    }

    /// Random delay to apply for this snapshot, if any
    pub fn delay_for(&self, snapshot: &RateLimitSnapshot) -> Option<Duration> {
        self.window_for(snapshot)
            .map(|window| window.sample(&mut rand::thread_rng()))
    }

    /// Sleep before returning control when the budget is low
    pub async fn maybe_throttle(&self, snapshot: &RateLimitSnapshot) {
        if let Some(delay) = self.delay_for(snapshot) {
            debug!(
                remaining = snapshot.remaining,
                reset_seconds = snapshot.reset_seconds,
                delay_ms = delay.as_millis() as u64,
                "Rate limit budget low, slowing down"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

// ============================================================================
// Pacer
// ============================================================================

/// Configuration for local request pacing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Maximum number of requests per second
    pub requests_per_second: u32,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: 10,
        }
    }
}

impl PacingConfig {
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }
}

/// Token bucket shared by every attempt of one client
#[derive(Clone)]
pub struct Pacer {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl Pacer {
    pub fn new(config: &PacingConfig) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN));

        Self {
            limiter: Arc::new(Governor::direct(quota)),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for Pacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pacer").finish_non_exhaustive()
    }
}
