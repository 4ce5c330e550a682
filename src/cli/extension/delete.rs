use clap::Args;

use crate::cli::{extension_key, run_request};
use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{AuthMethod, HttpMethod, Messages, RequestConfiguration};
use crate::core::services::format::ResultFormat;
use crate::error::Result;
use crate::services::{ServiceProvider, SimpleServices};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// The extension key to delete
    #[arg(value_name = "EXTENSION_KEY")]
    pub key: Option<String>,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct DeleteCommand {
    key: String,
}

impl DeleteCommand {
    pub fn new(key: String) -> Self {
        Self { key }
    }
}

impl ClientRequestCommand for DeleteCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            auth_method: AuthMethod::All,
            result_format: ResultFormat::None,
            confirmation_required: true,
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        Ok(RequestConfiguration::new(HttpMethod::Delete, format!("extension/{}", self.key)))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            format!("Deleting extension {}", self.key),
            format!("Extension {} was successfully deleted.", self.key),
            format!("Extension {} could not be deleted.", self.key),
        )
        .with_confirmation(format!(
            "Are you sure you want to delete the extension {}? This cannot be undone.",
            self.key
        ))
    }
}

pub async fn execute(args: DeleteArgs, services: &SimpleServices) -> Result<i32> {
    let key = extension_key(args.key.as_deref(), &services.config())?;
    run_request(DeleteCommand::new(key), &args.common, services).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::execute;
    use crate::core::command::tests::{context, RecordingTransport};
    use serde_json::json;

    #[test]
    fn test_request() {
        let command = DeleteCommand::new("news".to_string());
        let request = command.request_configuration().unwrap();

        assert_eq!(request.method(), HttpMethod::Delete);
        assert_eq!(request.endpoint(), "extension/news");
        assert!(command.settings().confirmation_required);
        assert!(command.messages().confirmation.contains("news"));
    }

    #[tokio::test]
    async fn test_declining_keeps_the_extension() {
        let transport = RecordingTransport::new(200, json!({}));
        let (context, buffer, asked) = context(transport.clone(), false);

        let code = execute(&DeleteCommand::new("news".to_string()), &CommonOptions::default(), context).await;

        assert_eq!(code, 0);
        assert_eq!(asked.lock().unwrap().len(), 1);
        assert!(transport.requests.lock().unwrap().is_empty());
        assert_eq!(buffer.contents(), "Execution aborted.\n");
    }

    #[tokio::test]
    async fn test_forced_delete() {
        let transport = RecordingTransport::new(200, serde_json::Value::Null);
        let (context, buffer, asked) = context(transport.clone(), false);
        let options = CommonOptions {
            raw: None,
            force: Some(None),
        };

        let code = execute(&DeleteCommand::new("news".to_string()), &options, context).await;

        assert_eq!(code, 0);
        assert!(asked.lock().unwrap().is_empty());
        assert_eq!(transport.requests.lock().unwrap()[0].method(), HttpMethod::Delete);
        assert_eq!(buffer.contents(), "[OK] Extension news was successfully deleted.\n");
    }
}
