use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result, TailorError};

pub mod env;
pub mod validation;

use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

fn default_remote_base_uri() -> String {
    "https://extensions.typo3.org/".to_string()
}

fn default_api_version() -> String {
    "v1".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// TER instance URL
    #[serde(default = "default_remote_base_uri")]
    pub remote_base_uri: String,

    /// REST API version segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Access token used for token authentication
    #[serde(default)]
    pub token: Option<String>,

    /// TYPO3.org username used for basic authentication
    #[serde(default)]
    pub username: Option<String>,

    /// TYPO3.org password used for basic authentication
    #[serde(default)]
    pub password: Option<String>,

    /// Fallback extension key for commands that take one
    #[serde(default)]
    pub extension_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_base_uri: default_remote_base_uri(),
            api_version: default_api_version(),
            token: None,
            username: None,
            password: None,
            extension_key: None,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Pick up a .env file in the working directory if there is one
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let config_file = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        };

        if let Some(config_file) = config_file {
            if config_file.exists() {
                debug!("Loading configuration from {}", config_file.display());
                config = Self::from_file(&config_file)?;
            } else if config_path.is_some() {
                return Err(crate::error::FileSystemError::PathNotFound { path: config_file }.into());
            }
        }

        // Environment variables have the highest priority
        config.load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    fn load_from_env(&mut self) -> Result<()> {
        if let Some(uri) = EnvParser::parse_string(EnvVars::REMOTE_BASE_URI, Some(ConfigValidator::validate_remote_base_uri))? {
            self.remote_base_uri = uri;
        }

        if let Some(version) = EnvParser::parse_string(EnvVars::API_VERSION, Some(ConfigValidator::validate_api_version))? {
            self.api_version = version;
        }

        if let Some(token) = EnvParser::parse_secret(EnvVars::API_TOKEN)? {
            self.token = Some(token);
        }

        if let Some(username) = EnvParser::parse_string(EnvVars::API_USERNAME, None)? {
            self.username = Some(username);
        }

        if let Some(password) = EnvParser::parse_secret(EnvVars::API_PASSWORD)? {
            self.password = Some(password);
        }

        if let Some(key) = EnvParser::parse_string(EnvVars::EXTENSION_KEY, None)? {
            self.extension_key = Some(key);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_remote_base_uri(&self.remote_base_uri)?;
        ConfigValidator::validate_api_version(&self.api_version)?;
        Ok(())
    }

    /// Base URL every endpoint is resolved against, e.g. `https://extensions.typo3.org/api/v1/`
    pub fn api_base_url(&self) -> Result<Url> {
        let base = format!(
            "{}/api/{}/",
            self.remote_base_uri.trim_end_matches('/'),
            self.api_version
        );
        Url::parse(&base).map_err(|e| {
            TailorError::Config(ConfigError::InvalidValue {
                field: "remote_base_uri".to_string(),
                value: format!("{} ({})", self.remote_base_uri, e),
            })
        })
    }

    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "typo3", "tailor")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path().ok_or_else(|| {
            TailorError::Internal(anyhow::anyhow!("Failed to determine project directories"))
        })
    }
}
