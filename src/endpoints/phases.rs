//! `/phases`

use super::LARGE_PAGE_SIZE;
use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::PageRequest;
use crate::types::JsonValue;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Phases<'a> {
    api: &'a ApiClient,
}

impl<'a> Phases<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self
            .api
            .fetch_all_pages("/phases", PageRequest::new().limit(LARGE_PAGE_SIZE))
            .await?;
        debug!(count = values.len(), "Fetched phases");
        Ok(values)
    }
}
