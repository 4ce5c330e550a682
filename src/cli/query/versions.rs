use clap::Args;

use crate::cli::{extension_key, run_request};
use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{AuthMethod, HttpMethod, Messages, RequestConfiguration};
use crate::core::services::format::ResultFormat;
use crate::error::Result;
use crate::services::{ServiceProvider, SimpleServices};

#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// The extension key
    #[arg(value_name = "EXTENSION_KEY")]
    pub key: Option<String>,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct VersionsCommand {
    key: String,
}

impl VersionsCommand {
    pub fn new(key: String) -> Self {
        Self { key }
    }
}

impl ClientRequestCommand for VersionsCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            auth_method: AuthMethod::None,
            result_format: ResultFormat::Table,
            ..CommandSettings::default()
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        Ok(RequestConfiguration::new(
            HttpMethod::Get,
            format!("extension/{}/versions", self.key),
        ))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            format!("Fetching published versions of extension {}", self.key),
            format!("Successfully fetched the versions of extension {}.", self.key),
            format!("Could not fetch the versions of extension {}.", self.key),
        )
    }
}

pub async fn execute(args: VersionsArgs, services: &SimpleServices) -> Result<i32> {
    let key = extension_key(args.key.as_deref(), &services.config())?;
    run_request(VersionsCommand::new(key), &args.common, services).await
}
