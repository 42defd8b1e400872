//! Resource endpoint wrappers
//!
//! Each wrapper borrows the shared [`ApiClient`] and maps one upstream
//! resource onto typed calls. Mutations check dry-run before doing any work,
//! log their intent, and return `{}`.

mod activity_log;
mod actuals;
mod assignments;
mod clients;
mod contracts;
mod custom_fields;
mod holiday_groups;
mod milestones;
mod other_expenses;
mod people;
mod phases;
mod project_tags;
mod projects;
mod rate_cards;
mod roles;
mod teams;
mod users;

pub use activity_log::ActivityLog;
pub use actuals::Actuals;
pub use assignments::{AssignmentFilter, Assignments};
pub use clients::{ClientFilter, Clients};
pub use contracts::Contracts;
pub use custom_fields::{CustomFields, SelectModel};
pub use holiday_groups::HolidayGroups;
pub use milestones::Milestones;
pub use other_expenses::OtherExpenses;
pub use people::People;
pub use phases::Phases;
pub use project_tags::ProjectTags;
pub use projects::Projects;
pub use rate_cards::RateCards;
pub use roles::Roles;
pub use teams::Teams;
pub use users::Users;

use crate::http::ApiClient;
use crate::types::JsonValue;
use std::fmt;
use tracing::debug;

/// Page size used by the high-volume list endpoints
pub const LARGE_PAGE_SIZE: u32 = 500;

/// Log and report a skipped mutation when the client is in dry-run mode
pub(crate) fn dry_run(api: &ApiClient, resource: &'static str, intent: fmt::Arguments<'_>) -> bool {
    if !api.is_dry_run() {
        return false;
    }
    debug!(resource, "(dry-run) {intent}");
    true
}

/// Object body with `extra` fields layered on top
///
/// Non-object `extra` values are ignored.
pub(crate) fn with_extra(mut base: JsonValue, extra: JsonValue) -> JsonValue {
    if let (Some(body), JsonValue::Object(fields)) = (base.as_object_mut(), extra) {
        body.extend(fields);
    }
    base
}

/// `true` only for a literal JSON `true`
pub(crate) fn flag(item: &JsonValue, field: &str) -> bool {
    item.get(field).and_then(JsonValue::as_bool).unwrap_or(false)
}

/// Numeric `id` of a resource
pub(crate) fn id_of(item: &JsonValue) -> Option<u64> {
    item.get("id").and_then(JsonValue::as_u64)
}

#[cfg(test)]
mod tests;
