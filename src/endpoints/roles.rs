//! `/roles`

use super::{dry_run, id_of};
use crate::error::{Error, Result};
use crate::http::{ApiClient, QueryParams};
use crate::types::{JsonValue, Reference, RoleRef};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Roles<'a> {
    api: &'a ApiClient,
}

impl<'a> Roles<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self.api.fetch_all("/roles").await?;
        debug!(count = values.len(), "Fetched roles");
        Ok(values)
    }

    pub async fn fetch_one(&self, role_id: u64) -> Result<JsonValue> {
        let role = self.api.get(&format!("/roles/{role_id}"), QueryParams::new()).await?;
        debug!(role_id, "Fetched role");
        Ok(role)
    }

    pub async fn create(&self, name: &str, references: &[Reference]) -> Result<JsonValue> {
        if dry_run(self.api, "roles", format_args!("created role name={name:?}")) {
            return Ok(json!({}));
        }

        let role = self
            .api
            .post("/roles", json!({ "name": name, "references": references }))
            .await?;
        debug!(name, id = ?id_of(&role), "Created role");
        Ok(role)
    }

    pub async fn update(&self, role_id: u64, values: JsonValue) -> Result<JsonValue> {
        if dry_run(self.api, "roles", format_args!("updated role id={role_id} values={values}")) {
            return Ok(json!({}));
        }

        let role = self.api.patch(&format!("/roles/{role_id}"), values).await?;
        debug!(role_id, "Updated role");
        Ok(role)
    }

    /// Resolve a role reference to its numeric id
    ///
    /// Ids pass through untouched. Names cost one `/roles` fetch and must
    /// match exactly.
    pub async fn resolve_id(&self, role: &RoleRef) -> Result<u64> {
        let name = match role {
            RoleRef::Id(id) => return Ok(*id),
            RoleRef::Name(name) => name,
        };

        let roles = self.fetch_all().await?;
        roles
            .iter()
            .find(|r| r.get("name").and_then(JsonValue::as_str) == Some(name.as_str()))
            .and_then(id_of)
            .ok_or_else(|| Error::RoleNotFound { name: name.clone() })
    }
}
