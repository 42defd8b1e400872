//! Authenticator implementation
//!
//! Builds the static header set for a request. There is no token refresh:
//! the API key is fixed for the lifetime of a client.

use crate::types::Method;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_ACCEPT_VERSION: &str = "accept-version";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_CONTENT_TYPE: &str = "content-type";

pub const JSON_MEDIA_TYPE: &str = "application/json";
/// API version pinned on every request
pub const ACCEPT_VERSION: &str = "1.0.0";

/// Headers for a request with the given method
pub fn build_headers(method: Method, api_key: &str) -> Vec<(&'static str, String)> {
    let mut headers = vec![
        (HEADER_ACCEPT, JSON_MEDIA_TYPE.to_string()),
        (HEADER_ACCEPT_VERSION, ACCEPT_VERSION.to_string()),
        (HEADER_AUTHORIZATION, format!("Bearer {api_key}")),
    ];

    if method.has_body() {
        headers.push((HEADER_CONTENT_TYPE, JSON_MEDIA_TYPE.to_string()));
    }

    headers
}

/// Holds the API key and renders request headers
#[derive(Clone)]
pub struct Authenticator {
    api_key: String,
}

impl Authenticator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Headers for a request with the given method
    pub fn headers(&self, method: Method) -> Vec<(&'static str, String)> {
        build_headers(method, &self.api_key)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
