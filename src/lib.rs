// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Resourcing API client
//!
//! An async client for a project-resourcing REST API (people, projects,
//! clients, assignments, and related records).
//!
//! ## Features
//!
//! - **Retry governor**: 401 fails fast, 429 waits for the advertised reset,
//!   5xx waits and retries
//! - **Proactive throttling**: slows down while the rate-limit budget runs low
//! - **Cursor pagination**: `fetch_all_pages` concatenates every page in order
//! - **Dry run**: state-changing calls are logged and skipped
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resourcing_client::{ClientConfig, ResourcingClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder("api-key").dry_run(true).build()?;
//!     let client = ResourcingClient::new(config)?;
//!
//!     let people = client.people().fetch_all().await?;
//!     client.teams().create("Platform").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       ResourcingClient                          │
//! │   people()  projects()  clients()  assignments()  roles() ...   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴─────┬────────────────────────────┐
//! │    Auth      │     ApiClient       │        Pagination          │
//! ├──────────────┼─────────────────────┼────────────────────────────┤
//! │ Bearer token │ Retry governor      │ nextCursor loop            │
//! │ Versioned    │ Throttle / pacing   │ Item extractors            │
//! │ accept header│ Dry-run short-cut   │                            │
//! └──────────────┴─────────────────────┴────────────────────────────┘
//!                                │
//!                     Transport (reqwest)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Request headers and credentials
pub mod auth;

/// Request execution with retry and rate limiting
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Client configuration
pub mod config;

/// Per-resource endpoint wrappers
pub mod endpoints;

/// Top-level client
pub mod client;

/// Subscriber setup for binaries
pub mod logging;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::ResourcingClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result, ResultExt};
pub use http::{ApiClient, Transport};
pub use pagination::{ItemExtractor, PageRequest};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
