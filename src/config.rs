//! Client configuration
//!
//! A [`ClientConfig`] is built once and handed to the client; it is never
//! mutated afterwards. It can be assembled with the builder, deserialized from
//! YAML or JSON, or read from `RESOURCING_*` environment variables.

use crate::error::{Error, Result, ResultExt};
use crate::http::{PacingConfig, RetryPolicy, ThrottleConfig};
use crate::types::{LogLevel, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default upstream base URL
pub const DEFAULT_BASE_URL: &str = "https://api.example-resourcing-service";

/// Default number of items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 200;

pub const ENV_API_KEY: &str = "RESOURCING_API_KEY";
pub const ENV_BASE_URL: &str = "RESOURCING_API_URL";
pub const ENV_DRY_RUN: &str = "RESOURCING_DRY_RUN";
pub const ENV_LOG_LEVEL: &str = "RESOURCING_LOG_LEVEL";

// ============================================================================
// ClientConfig
// ============================================================================

/// Configuration for a resourcing API client
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bearer token for every request
    #[serde(default, alias = "apiKey")]
    pub api_key: String,

    /// Base URL that request paths are appended to
    #[serde(default = "default_base_url", alias = "baseUrl")]
    pub base_url: String,

    /// Skip state-changing requests and return `{}` instead
    #[serde(default, alias = "isDryRun", alias = "dry_run")]
    pub is_dry_run: bool,

    /// Most verbose log level emitted
    #[serde(default, alias = "logLevel")]
    pub log_level: LogLevel,

    /// Page size sent as `limit` unless a caller overrides it
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request transport timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Retry behaviour for 429 and 5xx responses
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Header-driven proactive slow-down
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Optional local request pacing
    #[serde(default)]
    pub pacing: Option<PacingConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("resourcing-client/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Config with defaults for everything except the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            is_dry_run: false,
            log_level: LogLevel::default(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            retry: RetryPolicy::default(),
            throttle: ThrottleConfig::default(),
            pacing: None,
        }
    }

    /// Create a new config builder
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(api_key),
        }
    }

    /// Parse from YAML and validate
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON and validate
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Read from `RESOURCING_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read from an arbitrary variable source (used by [`ClientConfig::from_env`])
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).none_if_empty();

        let api_key = var(ENV_API_KEY).ok_or_else(|| Error::missing_field(ENV_API_KEY))?;
        let mut config = Self::new(api_key);

        if let Some(url) = var(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(flag) = var(ENV_DRY_RUN) {
            config.is_dry_run = parse_flag(ENV_DRY_RUN, &flag)?;
        }
        if let Some(level) = var(ENV_LOG_LEVEL) {
            config.log_level = level.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }

        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than zero"));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn max_attempts(&self) -> u32 {
        self.retry.max_attempts
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("is_dry_run", &self.is_dry_run)
            .field("log_level", &self.log_level)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .field("throttle", &self.throttle)
            .field("pacing", &self.pacing)
            .finish()
    }
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::invalid_value(field, format!("not a boolean: '{other}'"))),
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Enable or disable dry-run mode
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.config.is_dry_run = enabled;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Set the number of rate-limit retries
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.retry.max_attempts = attempts;
        self
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    pub fn throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.config.throttle = throttle;
        self
    }

    pub fn pacing(mut self, pacing: PacingConfig) -> Self {
        self.config.pacing = Some(pacing);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
