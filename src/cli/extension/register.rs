use clap::Args;

use crate::cli::{extension_key, run_request};
use crate::core::command::{ClientRequestCommand, CommonOptions};
use crate::core::dto::{HttpMethod, Messages, RequestConfiguration};
use crate::error::Result;
use crate::services::{ServiceProvider, SimpleServices};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// The extension key to register
    #[arg(value_name = "EXTENSION_KEY")]
    pub key: Option<String>,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct RegisterCommand {
    key: String,
}

impl RegisterCommand {
    pub fn new(key: String) -> Self {
        Self { key }
    }
}

impl ClientRequestCommand for RegisterCommand {
    fn request_configuration(&self) -> Result<RequestConfiguration> {
        Ok(RequestConfiguration::new(HttpMethod::Post, format!("extension/{}", self.key)))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            format!("Registering the extension key {}", self.key),
            format!("The extension key {} was successfully registered.", self.key),
            format!("The extension key {} could not be registered.", self.key),
        )
    }
}

pub async fn execute(args: RegisterArgs, services: &SimpleServices) -> Result<i32> {
    let key = extension_key(args.key.as_deref(), &services.config())?;
    run_request(RegisterCommand::new(key), &args.common, services).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dto::{AuthMethod, Payload};

    #[test]
    fn test_request() {
        let command = RegisterCommand::new("news".to_string());
        let request = command.request_configuration().unwrap();

        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(request.endpoint(), "extension/news");
        assert_eq!(request.payload(), &Payload::None);
        assert_eq!(command.settings().auth_method, AuthMethod::All);
        assert!(command.messages().success.contains("news"));
    }
}
