//! Common types used throughout the resourcing client
//!
//! This module contains shared type definitions, type aliases,
//! and small value types used across the core and the endpoint wrappers.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method accepted by the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PATCH,
    DELETE,
}

impl Method {
    /// Upper-case method name as it appears on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body
    pub fn has_body(self) -> bool {
        matches!(self, Method::POST | Method::PATCH)
    }

    /// Whether this method changes upstream state (and is skipped in dry-run mode)
    pub fn is_mutation(self) -> bool {
        !matches!(self, Method::GET)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level gate for client output
///
/// Ordered from least to most verbose; the default only lets errors through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// Lower-case name, usable as an `EnvFilter` directive
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
        }
    }
}

impl FromStr for LogLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(crate::Error::invalid_value(
                "log_level",
                format!("expected one of error|warn|info|debug, got '{other}'"),
            )),
        }
    }
}

// ============================================================================
// Time Filters
// ============================================================================

/// Lower bound for `modifiedAfter` / `occurredAfter` list filters
///
/// The upstream accepts either `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SSZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Since {
    Date(NaiveDate),
    Instant(DateTime<Utc>),
}

impl Since {
    /// Render in the upstream's accepted format
    pub fn to_query_value(&self) -> String {
        match self {
            Since::Date(date) => date.format("%Y-%m-%d").to_string(),
            Since::Instant(at) => at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

impl From<NaiveDate> for Since {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for Since {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Instant(at)
    }
}

// ============================================================================
// Resource References
// ============================================================================

/// External system reference attached to clients, roles and projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub reference_name: String,
    pub external_id: String,
}

impl Reference {
    pub fn new(reference_name: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            reference_name: reference_name.into(),
            external_id: external_id.into(),
        }
    }
}

/// A role given either by numeric id or by its display name
///
/// Names are resolved to ids with one `/roles` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRef {
    Id(u64),
    Name(String),
}

impl From<u64> for RoleRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for RoleRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for RoleRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}
