//! CLI module
//!
//! Command-line access to the resourcing API.
//!
//! # Commands
//!
//! - `list` - Fetch every record of a resource
//! - `get` - GET a single path
//! - `fetch` - Follow cursor pagination on an arbitrary path

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, Resource};
pub use runner::Runner;
