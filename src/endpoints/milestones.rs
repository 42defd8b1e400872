//! `/milestones`

use super::LARGE_PAGE_SIZE;
use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::PageRequest;
use crate::types::JsonValue;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Milestones<'a> {
    api: &'a ApiClient,
}

impl<'a> Milestones<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Every entry, fetched in pages of 500
    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self
            .api
            .fetch_all_pages("/milestones", PageRequest::new().limit(LARGE_PAGE_SIZE))
            .await?;
        debug!(count = values.len(), "Fetched milestones");
        Ok(values)
    }
}
