//! `/custom-fields/select`: select-type custom fields on projects and people

use super::{dry_run, with_extra};
use crate::error::Result;
use crate::http::ApiClient;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use tracing::{debug, error};

/// Resource a custom field is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SelectModel {
    Project,
    Person,
}

impl SelectModel {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectModel::Project => "PROJECT",
            SelectModel::Person => "PERSON",
        }
    }
}

impl fmt::Display for SelectModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CustomFields<'a> {
    api: &'a ApiClient,
}

impl<'a> CustomFields<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all_select(&self) -> Result<Vec<JsonValue>> {
        let values = self.api.fetch_all("/custom-fields/select").await?;
        debug!(count = values.len(), "Fetched select custom fields");
        Ok(values)
    }

    pub async fn fetch_project_select(&self) -> Result<Vec<JsonValue>> {
        self.fetch_select_for(SelectModel::Project).await
    }

    pub async fn fetch_person_select(&self) -> Result<Vec<JsonValue>> {
        self.fetch_select_for(SelectModel::Person).await
    }

    async fn fetch_select_for(&self, model: SelectModel) -> Result<Vec<JsonValue>> {
        let mut fields = self.fetch_all_select().await?;
        fields.retain(|f| f.get("model").and_then(JsonValue::as_str) == Some(model.as_str()));
        Ok(fields)
    }

    /// Create a single-select field
    ///
    /// Duplicate option names are dropped, keeping the first occurrence.
    /// `extra` overrides the default flags.
    pub async fn create_select<I, S>(
        &self,
        name: &str,
        model: SelectModel,
        options: I,
        extra: JsonValue,
    ) -> Result<JsonValue>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if dry_run(
            self.api,
            "custom_fields",
            format_args!("created custom field name={name:?} model={model}"),
        ) {
            return Ok(json!({}));
        }

        let body = json!({
            "name": name,
            "model": model,
            "options": unique_options(options),
            "singleSelect": true,
            "required": false,
            "showInPlanner": false,
            "filterableInPlanner": true,
        });

        let field = self
            .api
            .post("/custom-fields/select", with_extra(body, extra))
            .await?;
        debug!(name, %model, "Created select custom field");
        Ok(field)
    }

    pub async fn add_select_option(&self, field_id: u64, name: &str) -> Result<JsonValue> {
        if dry_run(
            self.api,
            "custom_fields",
            format_args!("added option {name:?} to custom field id={field_id}"),
        ) {
            return Ok(json!({}));
        }

        let option = self
            .api
            .post(
                &format!("/custom-fields/select/{field_id}/options"),
                json!({ "name": name }),
            )
            .await
            .map_err(|e| {
                error!(field_id, name, error = %e, "Failed to add custom field option");
                e
            })?;
        debug!(field_id, name, "Added custom field option");
        Ok(option)
    }
}

/// `[{name}]` option objects in first-seen order
fn unique_options<I, S>(options: I) -> Vec<JsonValue>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen: Vec<String> = Vec::new();
    for option in options {
        let option = option.into();
        if !seen.contains(&option) {
            seen.push(option);
        }
    }
    seen.into_iter().map(|name| json!({ "name": name })).collect()
}
