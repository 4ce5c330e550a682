use clap::Args;

use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{AuthMethod, HttpMethod, Messages, RequestConfiguration};
use crate::core::services::format::ResultFormat;
use crate::error::{Result, TailorError};
use crate::services::SimpleServices;

#[derive(Args, Debug, Default)]
pub struct FindArgs {
    /// Page number of the result list
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Number of extensions per page
    #[arg(long, default_value_t = 20)]
    pub per_page: u32,

    /// Only list extensions of this TYPO3 username
    #[arg(long)]
    pub author: Option<String>,

    /// Only list extensions compatible with this TYPO3 major version
    #[arg(long)]
    pub typo3_version: Option<u32>,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct FindCommand {
    page: u32,
    per_page: u32,
    author: Option<String>,
    typo3_version: Option<u32>,
}

impl FindCommand {
    pub fn new(args: &FindArgs) -> Self {
        Self {
            page: args.page,
            per_page: args.per_page,
            author: args.author.clone(),
            typo3_version: args.typo3_version,
        }
    }
}

impl ClientRequestCommand for FindCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            auth_method: AuthMethod::None,
            result_format: ResultFormat::Table,
            ..CommandSettings::default()
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        if self.page == 0 || self.per_page == 0 {
            return Err(TailorError::Validation(
                "--page and --per-page must be greater than 0".to_string(),
            ));
        }

        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        if let Some(author) = &self.author {
            query.push(("filter[username]".to_string(), author.clone()));
        }
        if let Some(version) = self.typo3_version {
            query.push(("filter[typo3_version]".to_string(), version.to_string()));
        }

        Ok(RequestConfiguration::new(HttpMethod::Get, "extension").with_query(query))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            "Searching extensions",
            "Successfully fetched the extension list.",
            "Could not fetch the extension list.",
        )
    }
}

pub async fn execute(args: FindArgs, services: &SimpleServices) -> Result<i32> {
    crate::cli::run_request(FindCommand::new(&args), &args.common, services).await
}
