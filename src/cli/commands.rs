//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resourcing API command-line client
#[derive(Parser, Debug)]
#[command(name = "resourcing-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON); falls back to RESOURCING_* env vars
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API key, overriding the configuration
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Base URL, overriding the configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Skip POST/PATCH/DELETE requests
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log level (error, warn, info, debug)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every record of a resource
    List {
        #[arg(value_enum)]
        resource: Resource,
    },

    /// GET a single resource path
    Get {
        /// Path relative to the base URL, e.g. /people/42
        path: String,
    },

    /// Fetch all pages of a list path
    Fetch {
        path: String,

        /// Page size override
        #[arg(long)]
        limit: Option<u32>,
    },
}

/// Resources reachable through `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Resource {
    ActivityLog,
    Actuals,
    Assignments,
    Clients,
    Contracts,
    CustomFields,
    HolidayGroups,
    Milestones,
    OtherExpenses,
    People,
    Phases,
    ProjectTags,
    Projects,
    RateCards,
    Roles,
    Teams,
    Users,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON value per line
    Json,
    /// Indented JSON
    Pretty,
}
