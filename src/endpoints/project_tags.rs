//! `/project-tags`

use super::{dry_run, id_of};
use crate::error::Result;
use crate::http::ApiClient;
use crate::types::JsonValue;
use serde_json::json;
use tracing::debug;

/// Upstream message returned when tagging a project twice
const ALREADY_TAGGED: &str = "already exists on Project";

#[derive(Debug, Clone, Copy)]
pub struct ProjectTags<'a> {
    api: &'a ApiClient,
}

impl<'a> ProjectTags<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self) -> Result<Vec<JsonValue>> {
        let values = self.api.fetch_all("/project-tags").await?;
        debug!(count = values.len(), "Fetched project tags");
        Ok(values)
    }

    pub async fn create(&self, name: &str) -> Result<JsonValue> {
        if dry_run(self.api, "project_tags", format_args!("created project tag name={name:?}")) {
            return Ok(json!({}));
        }

        let tag = self.api.post("/project-tags", json!({ "name": name })).await?;
        debug!(name, id = ?id_of(&tag), "Created project tag");
        Ok(tag)
    }

    /// Tag a project
    ///
    /// Tagging a project that already carries the tag is not an error and
    /// yields `true`.
    pub async fn add_to_project(&self, project_id: u64, tag_id: u64) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "project_tags",
            format_args!("added tag {tag_id} to project {project_id}"),
        ) {
            return Ok(json!({}));
        }

        let result = self
            .api
            .post(
                &format!("/project-tags/{tag_id}/project/{project_id}"),
                json!({ "projectId": project_id, "projectTagId": tag_id }),
            )
            .await;

        match result {
            Ok(tag) => {
                debug!(project_id, tag_id, "Added tag to project");
                Ok(tag)
            }
            Err(e) if e.upstream_message().is_some_and(|m| m.contains(ALREADY_TAGGED)) => {
                debug!(project_id, tag_id, "Project already has tag");
                Ok(JsonValue::Bool(true))
            }
            Err(e) => Err(e),
        }
    }

    /// Id of the tag named `name` in `existing`, creating it when missing
    ///
    /// Returns `None` when the tag had to be created in dry-run mode.
    pub async fn find_or_create(&self, existing: &[JsonValue], name: &str) -> Result<Option<u64>> {
        let found = existing
            .iter()
            .find(|tag| tag.get("name").and_then(JsonValue::as_str) == Some(name));

        match found {
            Some(tag) => Ok(id_of(tag)),
            None => Ok(id_of(&self.create(name).await?)),
        }
    }
}
