//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, Resource};
use crate::client::ResourcingClient;
use crate::config::ClientConfig;
use crate::endpoints::{AssignmentFilter, ClientFilter};
use crate::error::Result;
use crate::pagination::PageRequest;
use crate::types::{JsonValue, LogLevel};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Resolve configuration: file or environment, then command-line overrides
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match (&self.cli.config, &self.cli.api_key) {
            (Some(path), _) => ClientConfig::from_file(path)?,
            (None, Some(key)) => ClientConfig::new(key.clone()),
            (None, None) => ClientConfig::from_env()?,
        };

        if let Some(ref key) = self.cli.api_key {
            config.api_key.clone_from(key);
        }
        if let Some(ref url) = self.cli.base_url {
            config.base_url.clone_from(url);
        }
        if self.cli.dry_run {
            config.is_dry_run = true;
        }
        if let Some(ref level) = self.cli.log_level {
            config.log_level = level.parse::<LogLevel>()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Run the CLI command
    pub async fn run(&self, config: ClientConfig) -> Result<()> {
        let client = ResourcingClient::new(config)?;

        match &self.cli.command {
            Commands::List { resource } => {
                let values = list(&client, *resource).await?;
                info!(resource = ?resource, count = values.len(), "Listed resource");
                self.output(&JsonValue::Array(values));
            }
            Commands::Get { path } => {
                let value = client.api().get(path, Default::default()).await?;
                self.output(&value);
            }
            Commands::Fetch { path, limit } => {
                let mut page = PageRequest::new();
                if let Some(limit) = limit {
                    page = page.limit(*limit);
                }
                let values = client.api().fetch_all_pages(path, page).await?;
                self.output(&JsonValue::Array(values));
            }
        }

        Ok(())
    }

    fn output(&self, value: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(value).unwrap_or_default()),
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

async fn list(client: &ResourcingClient, resource: Resource) -> Result<Vec<JsonValue>> {
    match resource {
        Resource::ActivityLog => client.activity_log().fetch_all(None).await,
        Resource::Actuals => client.actuals().fetch_all(None).await,
        Resource::Assignments => {
            client
                .assignments()
                .fetch_all(&AssignmentFilter::default())
                .await
        }
        Resource::Clients => client.clients().fetch_all(&ClientFilter::default()).await,
        Resource::Contracts => client.contracts().fetch_all().await,
        Resource::CustomFields => client.custom_fields().fetch_all_select().await,
        Resource::HolidayGroups => client.holiday_groups().fetch_all().await,
        Resource::Milestones => client.milestones().fetch_all().await,
        Resource::OtherExpenses => client.other_expenses().fetch_all().await,
        Resource::People => client.people().fetch_all().await,
        Resource::Phases => client.phases().fetch_all().await,
        Resource::ProjectTags => client.project_tags().fetch_all().await,
        Resource::Projects => client.projects().fetch_all().await,
        Resource::RateCards => client.rate_cards().fetch_all().await,
        Resource::Roles => client.roles().fetch_all().await,
        Resource::Teams => client.teams().fetch_all().await,
        Resource::Users => client.users().fetch_all(None).await,
    }
}
