//! `/actuals`: time actually logged against projects

use super::LARGE_PAGE_SIZE;
use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::PageRequest;
use crate::types::{JsonValue, Since};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Actuals<'a> {
    api: &'a ApiClient,
}

impl<'a> Actuals<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// All actuals, optionally only those modified after `modified_after`
    pub async fn fetch_all(&self, modified_after: Option<Since>) -> Result<Vec<JsonValue>> {
        let mut page = PageRequest::new().limit(LARGE_PAGE_SIZE);
        if let Some(since) = modified_after {
            page = page.param("modifiedAfter", since.to_query_value());
        }

        let values = self.api.fetch_all_pages("/actuals", page).await?;
        debug!(count = values.len(), "Fetched actuals");
        Ok(values)
    }
}
