//! `/clients`
//!
//! Clients cannot be deleted upstream; archiving is the closest equivalent.

use super::{dry_run, flag, id_of};
use crate::error::Result;
use crate::http::{ApiClient, QueryParams};
use crate::pagination::PageRequest;
use crate::types::{JsonValue, Reference, Since};
use serde_json::json;
use tracing::debug;

/// Filters for [`Clients::fetch_all`]
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    /// Drop archived clients
    pub only_active: bool,
    pub modified_after: Option<Since>,
}

#[derive(Debug, Clone, Copy)]
pub struct Clients<'a> {
    api: &'a ApiClient,
}

impl<'a> Clients<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self, filter: &ClientFilter) -> Result<Vec<JsonValue>> {
        let mut page = PageRequest::new();
        if let Some(ref since) = filter.modified_after {
            page = page.param("modifiedAfter", since.to_query_value());
        }

        let mut values = self.api.fetch_all_pages("/clients", page).await?;
        if filter.only_active {
            values.retain(|client| !flag(client, "isArchived"));
        }

        debug!(count = values.len(), "Fetched clients");
        Ok(values)
    }

    pub async fn fetch_one(&self, client_id: u64) -> Result<JsonValue> {
        let client = self
            .api
            .get(&format!("/clients/{client_id}"), QueryParams::new())
            .await?;
        debug!(client_id, "Fetched client");
        Ok(client)
    }

    pub async fn create(&self, name: &str, references: &[Reference]) -> Result<JsonValue> {
        if dry_run(self.api, "clients", format_args!("created client name={name:?}")) {
            return Ok(json!({}));
        }

        let client = self
            .api
            .post("/clients", json!({ "name": name, "references": references }))
            .await?;
        debug!(name, id = ?id_of(&client), "Created client");
        Ok(client)
    }

    pub async fn update(&self, client_id: u64, values: JsonValue) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "clients",
            format_args!("updated client id={client_id} values={values}"),
        ) {
            return Ok(json!({}));
        }

        let client = self
            .api
            .patch(&format!("/clients/{client_id}"), values)
            .await?;
        debug!(client_id, "Updated client");
        Ok(client)
    }

    pub async fn archive(&self, client_id: u64) -> Result<JsonValue> {
        self.update(client_id, json!({ "isArchived": true })).await
    }

    pub async fn unarchive(&self, client_id: u64) -> Result<JsonValue> {
        self.update(client_id, json!({ "isArchived": false })).await
    }

    /// Projects assigned to a client
    pub async fn list_projects(&self, client_id: u64) -> Result<Vec<JsonValue>> {
        let projects = self
            .api
            .fetch_all(&format!("/clients/{client_id}/projects"))
            .await?;
        debug!(client_id, count = projects.len(), "Fetched client projects");
        Ok(projects)
    }
}
