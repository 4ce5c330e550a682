use clap::Args;

use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{AuthMethod, HttpMethod, Messages, RequestConfiguration};
use crate::core::services::format::ResultFormat;
use crate::error::Result;
use crate::services::SimpleServices;

#[derive(Args, Debug)]
pub struct RevokeTokenArgs {
    /// The access token to revoke
    #[arg(value_name = "TOKEN")]
    pub token: String,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct RevokeTokenCommand {
    token: String,
}

impl RevokeTokenCommand {
    pub fn new(args: &RevokeTokenArgs) -> Self {
        Self {
            token: args.token.clone(),
        }
    }
}

impl ClientRequestCommand for RevokeTokenCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            auth_method: AuthMethod::Basic,
            result_format: ResultFormat::None,
            confirmation_required: false,
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        Ok(RequestConfiguration::new(HttpMethod::Post, "auth/token/revoke")
            .with_form(vec![("token".to_string(), self.token.clone())]))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            "Revoking an access token",
            "Access token was successfully revoked.",
            "Access token could not be revoked.",
        )
    }
}

pub async fn execute(args: RevokeTokenArgs, services: &SimpleServices) -> Result<i32> {
    crate::cli::run_request(RevokeTokenCommand::new(&args), &args.common, services).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request() {
        let command = RevokeTokenCommand::new(&RevokeTokenArgs {
            token: "abc".to_string(),
            common: CommonOptions::default(),
        });
        let request = command.request_configuration().unwrap();

        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(request.endpoint(), "auth/token/revoke");
        assert_eq!(command.settings().result_format, ResultFormat::None);
        assert_eq!(command.settings().auth_method, AuthMethod::Basic);
    }
}
