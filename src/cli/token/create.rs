use clap::Args;

use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{AuthMethod, HttpMethod, Messages, RequestConfiguration};
use crate::error::{Result, TailorError};
use crate::services::SimpleServices;

const SCOPES: [&str; 2] = ["extension:read", "extension:write"];

#[derive(Args, Debug)]
pub struct CreateTokenArgs {
    /// Name of the access token
    #[arg(long)]
    pub name: Option<String>,

    /// Expiration in seconds
    #[arg(long)]
    pub expires: Option<u64>,

    /// Scopes of the access token, comma separated
    #[arg(long, default_value = "extension:read,extension:write")]
    pub scope: String,

    /// Extension keys the token is restricted to, comma separated
    #[arg(long)]
    pub extensions: Option<String>,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct CreateTokenCommand {
    args: CreateTokenArgs,
}

impl CreateTokenCommand {
    pub fn new(args: CreateTokenArgs) -> Self {
        Self { args }
    }

    fn name(&self) -> String {
        self.args.name.clone().unwrap_or_else(|| {
            format!("Generated by tailor on {}", chrono::Local::now().format("%d.%m.%Y %H:%M:%S"))
        })
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl ClientRequestCommand for CreateTokenCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            auth_method: AuthMethod::Basic,
            ..CommandSettings::default()
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        let scopes = split_list(&self.args.scope);
        if scopes.is_empty() {
            return Err(TailorError::Validation("At least one scope is required".to_string()));
        }
        if let Some(unknown) = scopes.iter().find(|scope| !SCOPES.contains(&scope.as_str())) {
            return Err(TailorError::Validation(format!(
                "Unknown scope '{}'. Available: {}",
                unknown,
                SCOPES.join(", ")
            )));
        }

        let mut form = vec![
            ("name".to_string(), self.name()),
            ("scope".to_string(), scopes.join(",")),
        ];
        if let Some(expires) = self.args.expires {
            form.push(("expires".to_string(), expires.to_string()));
        }
        if let Some(extensions) = &self.args.extensions {
            let keys = split_list(extensions);
            if !keys.is_empty() {
                form.push(("extensions".to_string(), keys.join(",")));
            }
        }

        Ok(RequestConfiguration::new(HttpMethod::Post, "auth/token").with_form(form))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            "Creating an access token",
            "Access token was successfully created.",
            "Access token could not be created.",
        )
    }
}

pub async fn execute(args: CreateTokenArgs, services: &SimpleServices) -> Result<i32> {
    let common = args.common.clone();
    crate::cli::run_request(CreateTokenCommand::new(args), &common, services).await
}
