//! `/other-expenses`

use super::LARGE_PAGE_SIZE;
use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::PageRequest;
use crate::types::JsonValue;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct OtherExpenses<'a> {
    api: &'a ApiClient,
}

impl<'a> OtherExpenses<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Expenses outside of assignments (travel, licences, ...)
    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self
            .api
            .fetch_all_pages("/other-expenses", PageRequest::new().limit(LARGE_PAGE_SIZE))
            .await?;
        debug!(count = values.len(), "Fetched other expenses");
        Ok(values)
    }
}
