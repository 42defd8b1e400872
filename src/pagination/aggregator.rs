//! Cursor pagination aggregator
//!
//! Follows `nextCursor` until the server stops returning one, concatenating
//! every page's items in server order. There is no page cap: a server that
//! never ends the sequence keeps the loop running.

use super::types::{next_cursor, PageRequest, PaginationState};
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::types::JsonValue;
use tracing::debug;

impl ApiClient {
    /// GET every page of a list endpoint
    pub async fn fetch_all_pages(&self, path: &str, page: PageRequest) -> Result<Vec<JsonValue>> {
        let default_limit = self.config().page_size;
        let mut state = PaginationState::new();
        let mut results = Vec::new();

        while !state.done {
            let request = ApiRequest::get(path).query(page.page_query(default_limit, &state.cursor));
            let response = self.execute(&request).await?;

            let items = page.extractor.extract(path, &response.body)?;
            let count = items.len();
            results.extend(items);
            state.advance(count, next_cursor(&response.body));

            debug!(
                path,
                page = state.pages,
                items = count,
                total = state.total_fetched,
                "Fetched page"
            );
        }

        Ok(results)
    }

    /// GET every page with the default `values` extractor
    pub async fn fetch_all(&self, path: &str) -> Result<Vec<JsonValue>> {
        self.fetch_all_pages(path, PageRequest::default()).await
    }
}
