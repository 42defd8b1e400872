//! Top-level client
//!
//! [`ResourcingClient`] owns one [`ApiClient`] and hands out borrowed
//! endpoint wrappers:
//!
//! ```rust,ignore
//! let client = ResourcingClient::new(ClientConfig::new("api-key"))?;
//! let people = client.people().fetch_all().await?;
//! ```

use crate::config::ClientConfig;
use crate::endpoints::{
    ActivityLog, Actuals, Assignments, Clients, Contracts, CustomFields, HolidayGroups,
    Milestones, OtherExpenses, People, Phases, ProjectTags, Projects, RateCards, Roles, Teams,
    Users,
};
use crate::error::Result;
use crate::http::{ApiClient, Transport};
use std::sync::Arc;

/// Client for the resourcing API
#[derive(Debug, Clone)]
pub struct ResourcingClient {
    api: ApiClient,
}

impl ResourcingClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }

    /// Build from `RESOURCING_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::with_transport(config, transport)?,
        })
    }

    /// Shared request core, for paths without a dedicated wrapper
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    pub fn activity_log(&self) -> ActivityLog<'_> {
        ActivityLog::new(&self.api)
    }

    pub fn actuals(&self) -> Actuals<'_> {
        Actuals::new(&self.api)
    }

    pub fn assignments(&self) -> Assignments<'_> {
        Assignments::new(&self.api)
    }

    pub fn clients(&self) -> Clients<'_> {
        Clients::new(&self.api)
    }

    pub fn contracts(&self) -> Contracts<'_> {
        Contracts::new(&self.api)
    }

    pub fn custom_fields(&self) -> CustomFields<'_> {
        CustomFields::new(&self.api)
    }

    pub fn holiday_groups(&self) -> HolidayGroups<'_> {
        HolidayGroups::new(&self.api)
    }

    pub fn milestones(&self) -> Milestones<'_> {
        Milestones::new(&self.api)
    }

    pub fn other_expenses(&self) -> OtherExpenses<'_> {
        OtherExpenses::new(&self.api)
    }

    pub fn people(&self) -> People<'_> {
        People::new(&self.api)
    }

    pub fn phases(&self) -> Phases<'_> {
        Phases::new(&self.api)
    }

    pub fn project_tags(&self) -> ProjectTags<'_> {
        ProjectTags::new(&self.api)
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects::new(&self.api)
    }

    pub fn rate_cards(&self) -> RateCards<'_> {
        RateCards::new(&self.api)
    }

    pub fn roles(&self) -> Roles<'_> {
        Roles::new(&self.api)
    }

    pub fn teams(&self) -> Teams<'_> {
        Teams::new(&self.api)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(&self.api)
    }
}
