//! `/activity-log`
//!
//! The upstream rejects this endpoint with 422 for test accounts.

use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::PageRequest;
use crate::types::{JsonValue, Since};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct ActivityLog<'a> {
    api: &'a ApiClient,
}

impl<'a> ActivityLog<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Activity entries, optionally only those after `occurred_after`
    ///
    /// Failures surface as the underlying error; its
    /// [`upstream_message`](crate::Error::upstream_message) carries the
    /// server's explanation.
    pub async fn fetch_all(&self, occurred_after: Option<Since>) -> Result<Vec<JsonValue>> {
        let mut page = PageRequest::new();
        if let Some(since) = occurred_after {
            page = page.param("occurredAfter", since.to_query_value());
        }

        let values = self
            .api
            .fetch_all_pages("/activity-log", page)
            .await
            .map_err(|e| {
                if e.status() == Some(422) {
                    warn!(
                        upstream = e.upstream_message().unwrap_or_default(),
                        "Activity log is not available for this account"
                    );
                }
                e
            })?;

        debug!(count = values.len(), "Fetched activity log entries");
        Ok(values)
    }
}
