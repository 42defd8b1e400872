//! Request-execution core
//!
//! [`ApiClient`] turns an [`ApiRequest`] into a rendered transport call with
//! auth headers, runs it through the [`RetryGovernor`], and exposes the four
//! verbs the endpoint wrappers use:
//! - GET (single object, or every page via `fetch_all_pages`)
//! - POST / PATCH / DELETE, short-circuited in dry-run mode

use super::rate_limit::{Pacer, Throttle};
use super::request::{ApiRequest, ApiResponse, QueryParams};
use super::retry::RetryGovernor;
use super::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::types::JsonValue;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Shared request-execution core
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    authenticator: Authenticator,
    transport: Arc<dyn Transport>,
    governor: RetryGovernor,
}

impl ApiClient {
    /// Create a client backed by reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout(), &config.user_agent)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;

        let mut governor =
            RetryGovernor::new(config.retry.clone(), Throttle::new(config.throttle.clone()));
        if let Some(ref pacing) = config.pacing {
            governor = governor.with_pacer(Pacer::new(pacing));
        }

        Ok(Self {
            authenticator: Authenticator::new(config.api_key.clone()),
            config: Arc::new(config),
            transport,
            governor,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_dry_run(&self) -> bool {
        self.config.is_dry_run
    }

    pub fn governor(&self) -> &RetryGovernor {
        &self.governor
    }

    /// Execute one logical call through the retry governor
    ///
    /// Dry-run is not applied here; use the verb helpers for that.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let label = format!("{} {}", request.method, request.path);
        self.governor
            .execute(&label, || {
                let rendered = self.render(request);
                let transport = Arc::clone(&self.transport);
                async move { transport.send(rendered).await }
            })
            .await
    }

    /// GET a single resource
    pub async fn get(&self, path: &str, query: QueryParams) -> Result<JsonValue> {
        let request = ApiRequest::get(path).query(query);
        Ok(self.execute(&request).await?.body)
    }

    /// POST a JSON body
    pub async fn post(&self, path: &str, body: JsonValue) -> Result<JsonValue> {
        self.mutate(ApiRequest::post(path, body)).await
    }

    /// PATCH a JSON body
    pub async fn patch(&self, path: &str, body: JsonValue) -> Result<JsonValue> {
        self.mutate(ApiRequest::patch(path, body)).await
    }

    /// DELETE a resource
    pub async fn delete(&self, path: &str) -> Result<JsonValue> {
        self.mutate(ApiRequest::delete(path)).await
    }

    async fn mutate(&self, request: ApiRequest) -> Result<JsonValue> {
        if self.is_dry_run() {
            debug!(
                method = %request.method,
                path = %request.path,
                body = ?request.body,
                "(dry-run) skipped request"
            );
            return Ok(json!({}));
        }
        Ok(self.execute(&request).await?.body)
    }

    /// Render the absolute URL and headers for one attempt
    pub fn render(&self, request: &ApiRequest) -> TransportRequest {
        TransportRequest {
            method: request.method,
            url: self.build_url(&request.path_and_query()),
            headers: self.authenticator.headers(request.method),
            body: if request.method.has_body() {
                request.body.clone()
            } else {
                None
            },
        }
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("governor", &self.governor)
            .finish_non_exhaustive()
    }
}

