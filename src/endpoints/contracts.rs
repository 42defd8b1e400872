//! `/contracts`

use crate::error::Result;
use crate::http::ApiClient;
use crate::types::JsonValue;
use tracing::debug;

/// Contracts across all people
#[derive(Debug, Clone, Copy)]
pub struct Contracts<'a> {
    api: &'a ApiClient,
}

impl<'a> Contracts<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self.api.fetch_all("/contracts").await?;
        debug!(count = values.len(), "Fetched contracts");
        Ok(values)
    }
}
