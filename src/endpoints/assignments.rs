//! `/assignments`: people booked onto projects

use super::{flag, id_of, People, Projects, LARGE_PAGE_SIZE};
use crate::error::Result;
use crate::http::ApiClient;
use crate::pagination::PageRequest;
use crate::types::{JsonValue, Since};
use std::collections::HashSet;
use tracing::debug;

/// Filters for [`Assignments::fetch_all`]
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    /// Keep only active, non-placeholder, non-template assignments
    pub only_active: bool,
    pub modified_after: Option<Since>,
}

#[derive(Debug, Clone, Copy)]
pub struct Assignments<'a> {
    api: &'a ApiClient,
}

impl<'a> Assignments<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn fetch_all(&self, filter: &AssignmentFilter) -> Result<Vec<JsonValue>> {
        let mut page = PageRequest::new().limit(LARGE_PAGE_SIZE);
        if let Some(ref since) = filter.modified_after {
            page = page.param("modifiedAfter", since.to_query_value());
        }

        let mut values = self.api.fetch_all_pages("/assignments", page).await?;
        if filter.only_active {
            values.retain(|a| {
                flag(a, "isActive") && !flag(a, "isPlaceholder") && !flag(a, "isTemplate")
            });
        }

        debug!(count = values.len(), "Fetched assignments");
        Ok(values)
    }

    /// Real assignments on live projects and people
    ///
    /// Fetches projects, people and assignments in turn, then drops
    /// placeholders, templates, and anything on an archived project or person.
    pub async fn fetch_active(&self) -> Result<Vec<JsonValue>> {
        let archived_projects = archived_ids(&Projects::new(self.api).fetch_all().await?);
        let archived_people = archived_ids(&People::new(self.api).fetch_all().await?);

        let mut values = self.fetch_all(&AssignmentFilter::default()).await?;
        values.retain(|a| {
            !flag(a, "isPlaceholder")
                && !flag(a, "isTemplate")
                && !references_any(a, "projectId", &archived_projects)
                && !references_any(a, "personId", &archived_people)
        });

        debug!(count = values.len(), "Filtered active assignments");
        Ok(values)
    }
}

fn archived_ids(items: &[JsonValue]) -> HashSet<u64> {
    items
        .iter()
        .filter(|item| flag(item, "isArchived"))
        .filter_map(id_of)
        .collect()
}

fn references_any(item: &JsonValue, field: &str, ids: &HashSet<u64>) -> bool {
    item.get(field)
        .and_then(JsonValue::as_u64)
        .is_some_and(|id| ids.contains(&id))
}
