use clap::Args;

use crate::cli::{extension_key, run_request};
use crate::config::validation::ConfigValidator;
use crate::core::command::{ClientRequestCommand, CommandSettings, CommonOptions};
use crate::core::dto::{HttpMethod, Messages, RequestConfiguration};
use crate::core::services::format::ResultFormat;
use crate::error::{Result, TailorError};
use crate::services::{ServiceProvider, SimpleServices};

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// The extension key to update
    #[arg(value_name = "EXTENSION_KEY")]
    pub key: Option<String>,

    /// The composer name of the extension, e.g. vendor/package
    #[arg(long)]
    pub composer: Option<String>,

    /// Link to the issue tracker
    #[arg(long)]
    pub issues: Option<String>,

    /// Link to the source code repository
    #[arg(long)]
    pub repository: Option<String>,

    /// Link to the extension manual
    #[arg(long)]
    pub manual: Option<String>,

    /// Link to a PayPal donation page
    #[arg(long)]
    pub paypal: Option<String>,

    /// Tags of the extension, comma separated
    #[arg(long)]
    pub tags: Option<String>,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct UpdateCommand {
    key: String,
    args: UpdateArgs,
}

impl UpdateCommand {
    pub fn new(key: String, args: UpdateArgs) -> Self {
        Self { key, args }
    }
}

fn is_composer_name(name: &str) -> bool {
    let mut parts = name.split('/');
    let valid_part = |part: Option<&str>| {
        part.is_some_and(|p| {
            !p.is_empty()
                && p.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "._-".contains(c))
        })
    };
    valid_part(parts.next()) && valid_part(parts.next()) && parts.next().is_none()
}

impl ClientRequestCommand for UpdateCommand {
    fn settings(&self) -> CommandSettings {
        CommandSettings {
            result_format: ResultFormat::Detail,
            ..CommandSettings::default()
        }
    }

    fn request_configuration(&self) -> Result<RequestConfiguration> {
        let mut form = Vec::new();

        if let Some(composer) = &self.args.composer {
            if !is_composer_name(composer) {
                return Err(TailorError::Validation(format!(
                    "Invalid composer name '{}', expected vendor/package",
                    composer
                )));
            }
            form.push(("composer_name".to_string(), composer.clone()));
        }

        let links = [
            ("issues", &self.args.issues),
            ("repository", &self.args.repository),
            ("manual", &self.args.manual),
            ("paypal", &self.args.paypal),
        ];
        for (field, value) in links {
            if let Some(url) = value {
                ConfigValidator::validate_url(url, field)?;
                form.push((field.to_string(), url.clone()));
            }
        }

        if let Some(tags) = &self.args.tags {
            form.extend(
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(|tag| ("tags[]".to_string(), tag.to_string())),
            );
        }

        if form.is_empty() {
            return Err(TailorError::Validation(
                "Nothing to update. Pass at least one of --composer, --issues, --repository, --manual, --paypal, --tags"
                    .to_string(),
            ));
        }

        Ok(RequestConfiguration::new(HttpMethod::Put, format!("extension/{}", self.key)).with_form(form))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            format!("Updating meta information of extension {}", self.key),
            format!("Meta information of extension {} successfully updated.", self.key),
            format!("Meta information of extension {} could not be updated.", self.key),
        )
    }
}

pub async fn execute(args: UpdateArgs, services: &SimpleServices) -> Result<i32> {
    let key = extension_key(args.key.as_deref(), &services.config())?;
    let common = args.common.clone();
    run_request(UpdateCommand::new(key, args), &common, services).await
}
