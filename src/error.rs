//! Error types for the resourcing client
//!
//! This module defines the error hierarchy for the whole crate.
//! Every fallible call in the crate returns [`Result<T>`].

use crate::http::TransportError;
use thiserror::Error;

/// The main error type for the resourcing client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration
    // ============================================================================
    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("config field `{field}` is required")]
    MissingConfigField { field: String },

    #[error("config field `{field}` is invalid: {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("malformed YAML config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("malformed JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Request Execution Errors
    // ============================================================================
    #[error("Unauthorized, incorrect API key: {message}")]
    Authentication { message: String },

    #[error("Rate limit still exceeded after {attempts} retries (reset hint: {reset_seconds:?}s)")]
    RateLimitExhausted {
        attempts: u32,
        reset_seconds: Option<u64>,
    },

    #[error("Server error {status} persisted after {retries} retries: {message}")]
    ServerError {
        status: u16,
        message: String,
        retries: u32,
    },

    #[error("Request failed: {message}")]
    Request {
        status: Option<u16>,
        message: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Unexpected page shape from '{path}': {message}")]
    Pagination { path: String, message: String },

    #[error("Role '{name}' not found")]
    RoleNotFound { name: String },

    // ============================================================================
    // I/O
    // ============================================================================
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Other
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Free-form configuration problem
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Required field absent from the configuration
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a pagination error
    pub fn pagination(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pagination {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap a non-retryable transport failure
    pub fn request(source: TransportError) -> Self {
        Self::Request {
            status: source.status(),
            message: source.to_string(),
            source,
        }
    }

    /// HTTP status behind this error, when one is known
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { .. } => Some(401),
            Error::RateLimitExhausted { .. } => Some(429),
            Error::ServerError { status, .. } => Some(*status),
            Error::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Upstream `{message}` field carried by the failed response, if any
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Error::Request { source, .. } => source.upstream_message(),
            _ => None,
        }
    }
}

/// Result type alias for the resourcing client
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix errors with a description of the failed step
pub trait ResultExt<T> {
    /// Wrap the error as `Other("{message}: {error}")`
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Like [`ResultExt::context`], building the message only on failure
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", message.into(), Into::<Error>::into(e))))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), Into::<Error>::into(e))))
    }
}
