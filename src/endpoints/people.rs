//! `/people`, plus the contracts and team memberships hanging off a person

use super::{dry_run, id_of, with_extra, Roles, LARGE_PAGE_SIZE};
use crate::error::Result;
use crate::http::{ApiClient, QueryParams};
use crate::pagination::PageRequest;
use crate::types::{JsonValue, RoleRef};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct People<'a> {
    api: &'a ApiClient,
}

impl<'a> People<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Everyone, placeholders included
    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self
            .api
            .fetch_all_pages("/people", PageRequest::new().param("includePlaceholders", true))
            .await?;
        debug!(count = values.len(), "Fetched people");
        Ok(values)
    }

    pub async fn fetch_one(&self, person_id: u64) -> Result<JsonValue> {
        let person = self
            .api
            .get(&format!("/people/{person_id}"), QueryParams::new())
            .await?;
        debug!(person_id, "Fetched person");
        Ok(person)
    }

    /// Create a person with a role given by id or by name
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        role: impl Into<RoleRef>,
        extra: JsonValue,
    ) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "people",
            format_args!("created person name=\"{first_name} {last_name}\""),
        ) {
            return Ok(json!({}));
        }

        let role_id = Roles::new(self.api).resolve_id(&role.into()).await?;
        let body = json!({
            "firstName": first_name,
            "lastName": last_name,
            "roleId": role_id,
        });

        let person = self.api.post("/people", with_extra(body, extra)).await?;
        debug!(first_name, last_name, id = ?id_of(&person), "Created person");
        Ok(person)
    }

    pub async fn update(&self, person_id: u64, values: JsonValue) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "people",
            format_args!("updated person id={person_id} values={values}"),
        ) {
            return Ok(json!({}));
        }

        let person = self
            .api
            .patch(&format!("/people/{person_id}"), values)
            .await?;
        debug!(person_id, "Updated person");
        Ok(person)
    }

    pub async fn fetch_contracts(&self, person_id: u64) -> Result<Vec<JsonValue>> {
        let values = self
            .api
            .fetch_all_pages(
                &format!("/people/{person_id}/contracts"),
                PageRequest::new().limit(LARGE_PAGE_SIZE),
            )
            .await?;
        debug!(person_id, count = values.len(), "Fetched person contracts");
        Ok(values)
    }

    pub async fn add_contract(
        &self,
        person_id: u64,
        role_id: u64,
        extra: JsonValue,
    ) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "people",
            format_args!("added contract for person id={person_id} role id={role_id}"),
        ) {
            return Ok(json!({}));
        }

        let contract = self
            .api
            .post(
                &format!("/people/{person_id}/contracts"),
                with_extra(json!({ "roleId": role_id }), extra),
            )
            .await?;
        debug!(person_id, role_id, "Added person contract");
        Ok(contract)
    }

    /// Teams the person currently belongs to
    pub async fn fetch_teams(&self, person_id: u64) -> Result<Vec<JsonValue>> {
        let values = self
            .api
            .fetch_all_pages(
                &format!("/people/{person_id}/teams/current"),
                PageRequest::new().limit(LARGE_PAGE_SIZE),
            )
            .await?;
        debug!(person_id, count = values.len(), "Fetched person teams");
        Ok(values)
    }

    pub async fn add_to_team(&self, person_id: u64, team_id: u64) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "people",
            format_args!("added person id={person_id} to team id={team_id}"),
        ) {
            return Ok(json!({}));
        }

        let membership = self
            .api
            .post(&format!("/people/{person_id}/teams"), json!({ "teamId": team_id }))
            .await?;
        debug!(person_id, team_id, "Added person to team");
        Ok(membership)
    }

    pub async fn remove_from_team(&self, person_id: u64, team_id: u64) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "people",
            format_args!("removed person id={person_id} from team id={team_id}"),
        ) {
            return Ok(json!({}));
        }

        let response = self
            .api
            .delete(&format!("/people/{person_id}/teams/{team_id}"))
            .await?;
        debug!(person_id, team_id, "Removed person from team");
        Ok(response)
    }
}
