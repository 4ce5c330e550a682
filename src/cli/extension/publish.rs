use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::{extension_key, run_request};
use crate::core::command::{ClientRequestCommand, CommonOptions};
use crate::core::dto::{HttpMethod, Messages, RequestConfiguration};
use crate::core::metadata::emconf::EMCONF_FILE_NAME;
use crate::core::validation::{is_publishable_version, VersionValidator};
use crate::error::{Result, TailorError};
use crate::services::{ServiceProvider, SimpleServices};

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// The version to publish, e.g. 1.2.3
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// The extension key
    #[arg(value_name = "EXTENSION_KEY")]
    pub key: Option<String>,

    /// Path to the packaged extension (zip)
    #[arg(long)]
    pub artefact: PathBuf,

    /// Path to the extension directory containing ext_emconf.php
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Upload comment of the new version (e.g. release notes)
    #[arg(long, default_value = "")]
    pub comment: String,

    #[command(flatten)]
    pub common: CommonOptions,
}

pub struct PublishCommand {
    key: String,
    version: String,
    artefact: PathBuf,
    path: PathBuf,
    comment: String,
}

impl PublishCommand {
    pub fn new(key: String, args: &PublishArgs) -> Self {
        Self {
            key,
            version: args.version.trim().to_string(),
            artefact: args.artefact.clone(),
            path: args.path.clone(),
            comment: args.comment.clone(),
        }
    }
}

impl ClientRequestCommand for PublishCommand {
    fn request_configuration(&self) -> Result<RequestConfiguration> {
        if !is_publishable_version(&self.version) {
            return Err(TailorError::Validation(format!(
                "No valid version number given: '{}'. Use the format x.y.z",
                self.version
            )));
        }

        let emconf = self.path.join(EMCONF_FILE_NAME);
        if !VersionValidator::new(&emconf).is_valid(&self.version) {
            return Err(TailorError::Validation(format!(
                "The version in {} does not match {}",
                emconf.display(),
                self.version
            )));
        }

        if !self.artefact.is_file() {
            return Err(TailorError::Validation(format!(
                "Artefact {} does not exist",
                self.artefact.display()
            )));
        }
        debug!("Publishing {} as {} {}", self.artefact.display(), self.key, self.version);

        let fields = vec![
            ("description".to_string(), self.comment.clone()),
            ("gplCompliant".to_string(), "1".to_string()),
        ];

        Ok(RequestConfiguration::new(
            HttpMethod::Post,
            format!("extension/{}/{}", self.key, self.version),
        )
        .with_multipart_file(fields, "file", self.artefact.clone()))
    }

    fn messages(&self) -> Messages {
        Messages::new(
            format!("Publishing version {} of extension {}", self.version, self.key),
            format!("Version {} of extension {} was successfully published.", self.version, self.key),
            format!("Version {} of extension {} could not be published.", self.version, self.key),
        )
    }
}

pub async fn execute(args: PublishArgs, services: &SimpleServices) -> Result<i32> {
    let key = extension_key(args.key.as_deref(), &services.config())?;
    run_request(PublishCommand::new(key, &args), &args.common, services).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dto::Payload;
    use std::fs;

    fn extension(declared: &str) -> (tempfile::TempDir, PublishArgs) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(EMCONF_FILE_NAME),
            format!("<?php\n$EM_CONF[$_EXTKEY] = [\n    'title' => 'News',\n    'version' => '{}',\n];\n", declared),
        )
        .unwrap();
        fs::write(dir.path().join("news_1.0.0.zip"), b"PK\x03\x04").unwrap();

        let args = PublishArgs {
            version: "1.0.0".to_string(),
            key: Some("news".to_string()),
            artefact: dir.path().join("news_1.0.0.zip"),
            path: dir.path().to_path_buf(),
            comment: "Initial release".to_string(),
            common: CommonOptions::default(),
        };
        (dir, args)
    }

    #[test]
    fn test_request() {
        let (dir, args) = extension("1.0.0");
        let command = PublishCommand::new("news".to_string(), &args);
        let request = command.request_configuration().unwrap();

        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(request.endpoint(), "extension/news/1.0.0");
        assert_eq!(
            request.payload(),
            &Payload::Multipart {
                fields: vec![
                    ("description".to_string(), "Initial release".to_string()),
                    ("gplCompliant".to_string(), "1".to_string()),
                ],
                file_field: "file".to_string(),
                file: dir.path().join("news_1.0.0.zip"),
            }
        );
    }

    #[test]
    fn test_version_must_match_emconf() {
        let (_dir, args) = extension("0.9.0");
        let command = PublishCommand::new("news".to_string(), &args);
        assert!(command.request_configuration().is_err());
    }

    #[test]
    fn test_version_syntax() {
        let (_dir, mut args) = extension("1.0.0-dev");
        args.version = "1.0.0-dev".to_string();
        let command = PublishCommand::new("news".to_string(), &args);
        assert!(command.request_configuration().is_err());
    }

    #[test]
    fn test_missing_artefact() {
        let (dir, mut args) = extension("1.0.0");
        args.artefact = dir.path().join("missing.zip");
        let command = PublishCommand::new("news".to_string(), &args);
        assert!(command.request_configuration().is_err());
    }
}
