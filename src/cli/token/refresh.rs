use clap::Args;

use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{AuthMethod, HttpMethod, Messages, RequestConfiguration};
use crate::error::Result;
use crate::services::SimpleServices;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {
    /// The refresh token, received when the access token was created
    #[arg(value_name = "TOKEN")]
    pub token: String,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct RefreshTokenCommand {
    token: String,
}

impl RefreshTokenCommand {
    pub fn new(args: &RefreshTokenArgs) -> Self {
        Self {
            token: args.token.clone(),
        }
    }
}

impl ClientRequestCommand for RefreshTokenCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            auth_method: AuthMethod::None,
            ..CommandSettings::default()
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        Ok(RequestConfiguration::new(HttpMethod::Post, "auth/token/refresh")
            .with_form(vec![("token".to_string(), self.token.clone())]))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            "Refreshing an access token",
            "Access token was successfully refreshed.",
            "Access token could not be refreshed.",
        )
    }
}

pub async fn execute(args: RefreshTokenArgs, services: &SimpleServices) -> Result<i32> {
    crate::cli::run_request(RefreshTokenCommand::new(&args), &args.common, services).await
}
