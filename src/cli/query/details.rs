use clap::Args;

use crate::cli::{extension_key, run_request};
use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{AuthMethod, HttpMethod, Messages, RequestConfiguration};
use crate::core::services::format::ResultFormat;
use crate::error::Result;
use crate::services::{ServiceProvider, SimpleServices};

#[derive(Args, Debug)]
pub struct DetailsArgs {
    /// The extension key
    #[arg(value_name = "EXTENSION_KEY")]
    pub key: Option<String>,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct DetailsCommand {
    key: String,
}

impl DetailsCommand {
    pub fn new(key: String) -> Self {
        Self { key }
    }
}

impl ClientRequestCommand for DetailsCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            auth_method: AuthMethod::None,
            result_format: ResultFormat::Detail,
            ..CommandSettings::default()
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        Ok(RequestConfiguration::new(HttpMethod::Get, format!("extension/{}", self.key)))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            format!("Fetching details about extension {}", self.key),
            format!("Successfully fetched details for extension {}.", self.key),
            format!("Could not fetch details for extension {}.", self.key),
        )
    }
}

pub async fn execute(args: DetailsArgs, services: &SimpleServices) -> Result<i32> {
    let key = extension_key(args.key.as_deref(), &services.config())?;
    run_request(DetailsCommand::new(key), &args.common, services).await
}
