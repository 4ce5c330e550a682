use clap::Args;

use crate::cli::{extension_key, run_request};
use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{AuthMethod, HttpMethod, Messages, RequestConfiguration};
use crate::core::services::format::ResultFormat;
use crate::core::validation::is_publishable_version;
use crate::error::{Result, TailorError};
use crate::services::{ServiceProvider, SimpleServices};

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// The version to look up, e.g. 1.2.3
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// The extension key
    #[arg(value_name = "EXTENSION_KEY")]
    pub key: Option<String>,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct VersionCommand {
    key: String,
    version: String,
}

impl VersionCommand {
    pub fn new(key: String, version: &str) -> Self {
        Self {
            key,
            version: version.trim().to_string(),
        }
    }
}

impl ClientRequestCommand for VersionCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            auth_method: AuthMethod::None,
            result_format: ResultFormat::Detail,
            ..CommandSettings::default()
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        if !is_publishable_version(&self.version) {
            return Err(TailorError::Validation(format!(
                "No valid version number given: '{}'. Use the format x.y.z",
                self.version
            )));
        }
        Ok(RequestConfiguration::new(
            HttpMethod::Get,
            format!("extension/{}/{}", self.key, self.version),
        ))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            format!("Fetching details about version {} of extension {}", self.version, self.key),
            format!("Successfully fetched version {} of extension {}.", self.version, self.key),
            format!("Could not fetch version {} of extension {}.", self.version, self.key),
        )
    }
}

pub async fn execute(args: VersionArgs, services: &SimpleServices) -> Result<i32> {
    let key = extension_key(args.key.as_deref(), &services.config())?;
    run_request(VersionCommand::new(key, &args.version), &args.common, services).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request() {
        let command = VersionCommand::new("news".to_string(), " 8.5.2 ");
        let request = command.request_configuration().unwrap();

        assert_eq!(request.endpoint(), "extension/news/8.5.2");
        assert_eq!(command.settings().auth_method, AuthMethod::None);
    }

    #[test]
    fn test_invalid_version() {
        for version in ["8.5", "v8.5.2", "8.5.2-dev", ""] {
            let command = VersionCommand::new("news".to_string(), version);
            assert!(command.request_configuration().is_err(), "{}", version);
        }
    }
}
