//! `/users`: accounts that can sign in, distinct from people

use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::PageRequest;
use crate::types::{JsonValue, Since};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    api: &'a ApiClient,
}

impl<'a> Users<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self, modified_after: Option<Since>) -> Result<Vec<JsonValue>> {
        let page = match modified_after {
            Some(since) => PageRequest::new().param("modifiedAfter", since.to_query_value()),
            None => PageRequest::new(),
        };

        let values = self.api.fetch_all_pages("/users", page).await?;
        debug!(count = values.len(), "Fetched users");
        Ok(values)
    }
}
