//! `/rate-cards`

use super::{dry_run, id_of, with_extra};
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::types::JsonValue;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct RateCards<'a> {
    api: &'a ApiClient,
}

impl<'a> RateCards<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self.api.fetch_all("/rate-cards").await?;
        debug!(count = values.len(), "Fetched rate cards");
        Ok(values)
    }

    /// Create an hourly, non-blended rate card unless `extra` says otherwise
    pub async fn create(&self, name: &str, extra: JsonValue) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "rate_cards",
            format_args!("created rate card name={name:?} values={extra}"),
        ) {
            return Ok(json!({}));
        }

        // The upstream insists on these exact string forms
        let body = json!({
            "name": name,
            "description": "",
            "isBlendedRateCard": "false",
            "blendedRate": "",
            "rateType": "hours",
        });

        let card = self
            .api
            .post("/rate-cards", with_extra(body, extra))
            .await?;
        debug!(name, id = ?id_of(&card), "Created rate card");
        Ok(card)
    }

    /// Delete a rate card, returning whether the server answered 204
    ///
    /// Nothing is deleted in dry-run mode, so the answer there is `false`.
    pub async fn delete(&self, rate_card_id: u64) -> Result<bool> {
        if dry_run(
            self.api,
            "rate_cards",
            format_args!("deleted rate card id={rate_card_id}"),
        ) {
            return Ok(false);
        }

        let response = self
            .api
            .execute(&ApiRequest::delete(format!("/rate-cards/{rate_card_id}")))
            .await?;
        debug!(rate_card_id, status = response.status, "Deleted rate card");
        Ok(response.status == 204)
    }
}
