use clap::Args;

use crate::cli::{extension_key, run_request};
use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{HttpMethod, Messages, RequestConfiguration};
use crate::error::{Result, TailorError};
use crate::services::{ServiceProvider, SimpleServices};

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// The TYPO3.org username of the new owner
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// The extension key to transfer
    #[arg(value_name = "EXTENSION_KEY")]
    pub key: Option<String>,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct TransferCommand {
    key: String,
    username: String,
}

impl TransferCommand {
    pub fn new(key: String, username: String) -> Self {
        Self { key, username }
    }
}

/// Usernames end up as a path segment, so only plain characters are allowed
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && !username.chars().all(|c| c == '.')
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._-@".contains(c))
}

impl ClientRequestCommand for TransferCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            confirmation_required: true,
            ..CommandSettings::default()
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        let username = self.username.trim();
        if !is_valid_username(username) {
            return Err(TailorError::Validation(format!("Invalid username '{}'", self.username)));
        }

        Ok(RequestConfiguration::new(
            HttpMethod::Post,
            format!("extension/{}/transfer/{}", self.key, username),
        ))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            format!("Transferring extension {} to {}", self.key, self.username),
            format!("Extension {} was successfully transferred to {}.", self.key, self.username),
            format!("Extension {} could not be transferred.", self.key),
        )
        .with_confirmation(format!(
            "Are you sure you want to transfer the extension {} to {}?",
            self.key, self.username
        ))
    }
}

pub async fn execute(args: TransferArgs, services: &SimpleServices) -> Result<i32> {
    let key = extension_key(args.key.as_deref(), &services.config())?;
    run_request(TransferCommand::new(key, args.username.clone()), &args.common, services).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request() {
        let command = TransferCommand::new("news".to_string(), "georg".to_string());
        let request = command.request_configuration().unwrap();

        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(request.endpoint(), "extension/news/transfer/georg");
        assert!(command.settings().confirmation_required);
    }

    #[test]
    fn test_invalid_username() {
        let command = TransferCommand::new("news".to_string(), "a/b".to_string());
        assert!(command.request_configuration().is_err());

        let command = TransferCommand::new("news".to_string(), "  ".to_string());
        assert!(command.request_configuration().is_err());
    }

    #[test]
    fn test_username_cannot_leave_the_transfer_endpoint() {
        for username in ["..", ".", "georg?admin=1", "georg#top", "ge org", "%2e%2e"] {
            let command = TransferCommand::new("news".to_string(), username.to_string());
            assert!(command.request_configuration().is_err(), "{}", username);
        }
    }

    #[test]
    fn test_is_valid_username() {
        assert!(is_valid_username("georg"));
        assert!(is_valid_username("g.ringer"));
        assert!(is_valid_username("team-news_2"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("..."));
    }
}
