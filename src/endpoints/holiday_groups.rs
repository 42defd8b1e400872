//! `/holiday-groups`

use crate::error::Result;
use crate::http::ApiClient;
use crate::types::JsonValue;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct HolidayGroups<'a> {
    api: &'a ApiClient,
}

impl<'a> HolidayGroups<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self.api.fetch_all("/holiday-groups").await?;
        debug!(count = values.len(), "Fetched holiday groups");
        Ok(values)
    }
}
