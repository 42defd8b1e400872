//! `/teams`

use super::{dry_run, id_of};
use crate::error::Result;
use crate::http::ApiClient;
use crate::types::JsonValue;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Teams<'a> {
    api: &'a ApiClient,
}

impl<'a> Teams<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self.api.fetch_all("/teams").await?;
        debug!(count = values.len(), "Fetched teams");
        Ok(values)
    }

    pub async fn create(&self, name: &str) -> Result<JsonValue> {
        if dry_run(self.api, "teams", format_args!("created team name={name:?}")) {
            return Ok(json!({}));
        }

        let team = self.api.post("/teams", json!({ "name": name })).await?;
        debug!(name, id = ?id_of(&team), "Created team");
        Ok(team)
    }
}
