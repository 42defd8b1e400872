//! `/projects`

use super::{dry_run, id_of, with_extra};
use crate::error::Result;
use crate::http::ApiClient;
use crate::types::JsonValue;
use serde_json::json;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct Projects<'a> {
    api: &'a ApiClient,
}

impl<'a> Projects<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self.api.fetch_all("/projects").await?;
        debug!(count = values.len(), "Fetched projects");
        Ok(values)
    }

    /// Create a project; `extra` fields are merged over `name`
    pub async fn create(&self, name: &str, extra: JsonValue) -> Result<JsonValue> {
        if dry_run(self.api, "projects", format_args!("created project name={name:?}")) {
            return Ok(json!({}));
        }

        let project = self
            .api
            .post("/projects", with_extra(json!({ "name": name }), extra))
            .await?;
        debug!(name, id = ?id_of(&project), "Created project");
        Ok(project)
    }

    pub async fn update(&self, project_id: u64, values: JsonValue) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "projects",
            format_args!("updated project id={project_id} values={values}"),
        ) {
            return Ok(json!({}));
        }

        let project = self
            .api
            .patch(&format!("/projects/{project_id}"), values)
            .await?;
        debug!(project_id, "Updated project");
        Ok(project)
    }

    pub async fn archive(&self, project_id: u64) -> Result<JsonValue> {
        self.update(project_id, json!({ "isArchived": true })).await
    }

    pub async fn unarchive(&self, project_id: u64) -> Result<JsonValue> {
        self.update(project_id, json!({ "isArchived": false })).await
    }

    /// Attach a free-text note, typically recording why a project changed
    pub async fn add_note(&self, project_id: u64, note: &str) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "projects",
            format_args!("added note to project id={project_id}"),
        ) {
            return Ok(json!({}));
        }

        let created = self
            .api
            .post(&format!("/projects/{project_id}/notes"), json!({ "note": note }))
            .await?;
        debug!(project_id, "Added project note");
        Ok(created)
    }

    /// Pick values of a select custom field on a project
    ///
    /// Null entries are dropped. An empty selection sends nothing and
    /// returns `None`.
    pub async fn add_custom_select_values(
        &self,
        project_id: u64,
        select_id: u64,
        values: &[JsonValue],
    ) -> Result<Option<JsonValue>> {
        let values: Vec<&JsonValue> = values.iter().filter(|v| !v.is_null()).collect();

        if dry_run(
            self.api,
            "projects",
            format_args!(
                "updated project id={project_id} custom field {select_id} values={}",
                json!(values)
            ),
        ) {
            return Ok(Some(json!({})));
        }

        if values.is_empty() {
            warn!(project_id, select_id, "Empty values passed for project custom field");
            return Ok(None);
        }

        let response = self
            .api
            .patch(
                &format!("/projects/{project_id}/custom-fields/select"),
                json!({ "id": select_id, "values": values }),
            )
            .await?;

        debug!(
            project_id,
            select_id,
            count = response.get("values").and_then(JsonValue::as_array).map_or(0, Vec::len),
            "Updated project custom field"
        );
        Ok(Some(response))
    }
}
