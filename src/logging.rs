//! Log subscriber setup for binaries
//!
//! The library only emits `tracing` events. Applications that want them on
//! stderr call [`init`] once at startup.

use crate::types::LogLevel;
use tracing_subscriber::EnvFilter;

/// Filter with `level` as the default directive; `RUST_LOG` takes precedence
pub fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(tracing::Level::from(level).into())
        .from_env_lossy()
}

/// Install a stderr fmt subscriber
///
/// Returns `false` when a global subscriber was already set.
pub fn init(level: LogLevel) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
