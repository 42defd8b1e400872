//! Transport adapter
//!
//! A [`Transport`] performs exactly one HTTP exchange. It knows nothing about
//! retries, throttling or pagination; the request-execution core layers those
//! on top.

use super::request::ApiResponse;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// A fully rendered request: absolute URL, headers and optional JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<JsonValue>,
}

impl TransportRequest {
    /// Look up a header value by (lower-case) name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Failure of a single transport call
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {}", describe_body(.body))]
    Status {
        status: u16,
        headers: HashMap<String, String>,
        body: JsonValue,
    },

    /// The request never produced a response
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a custom transport implementation
    #[error("{message}")]
    Other { message: String },
}

impl TransportError {
    /// HTTP status, for `Status` failures
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network(e) => e.status().map(|s| s.as_u16()),
            TransportError::Other { .. } => None,
        }
    }

    /// Response headers, for `Status` failures
    pub fn headers(&self) -> Option<&HashMap<String, String>> {
        match self {
            TransportError::Status { headers, .. } => Some(headers),
            _ => None,
        }
    }

    /// The `{message}` field of a JSON error body
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            TransportError::Status { body, .. } => body.get("message").and_then(JsonValue::as_str),
            _ => None,
        }
    }
}

fn describe_body(body: &JsonValue) -> String {
    match body {
        JsonValue::Null => "<empty body>".to_string(),
        JsonValue::String(text) => text.clone(),
        other => other
            .get("message")
            .and_then(JsonValue::as_str)
            .map_or_else(|| other.to_string(), str::to_string),
    }
}

/// Capability to perform one HTTP exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request; non-2xx statuses come back as [`TransportError::Status`]
    async fn send(&self, request: TransportRequest) -> std::result::Result<ApiResponse, TransportError>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with the given timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> std::result::Result<ApiResponse, TransportError> {
        let mut req = self.client.request(request.method.into(), &request.url);

        for (key, value) in &request.headers {
            req = req.header(*key, value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect::<HashMap<_, _>>();

        let text = response.text().await?;
        let body = parse_body(&text);

        if (200..300).contains(&status) {
            Ok(ApiResponse {
                status,
                headers,
                body,
            })
        } else {
            Err(TransportError::Status {
                status,
                headers,
                body,
            })
        }
    }
}

/// Parse a response body as JSON, keeping non-JSON text as a string value
fn parse_body(text: &str) -> JsonValue {
    if text.trim().is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
}
