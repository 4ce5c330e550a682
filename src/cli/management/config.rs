use clap::{Args, Subcommand};
use std::io::{self, Write};

use crate::config::Config;
use crate::error::{Result, TailorError};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show,

    /// Print a single configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show configuration file path
    Path,

    /// List all available configuration keys
    Keys,
}

const KEYS: [(&str, &str); 6] = [
    ("remote_base_uri", "TER instance URL"),
    ("api_version", "REST API version segment"),
    ("token", "Access token for token authentication"),
    ("username", "TYPO3.org username for basic authentication"),
    ("password", "TYPO3.org password for basic authentication"),
    ("extension_key", "Fallback extension key"),
];

fn mask(secret: &Option<String>) -> String {
    match secret {
        Some(value) if !value.is_empty() => "********".to_string(),
        _ => "none".to_string(),
    }
}

fn value_of(config: &Config, key: &str) -> Result<String> {
    let plain = |value: &Option<String>| value.clone().unwrap_or_else(|| "none".to_string());
    let value = match key {
        "remote_base_uri" => config.remote_base_uri.clone(),
        "api_version" => config.api_version.clone(),
        "token" => mask(&config.token),
        "username" => plain(&config.username),
        "password" => mask(&config.password),
        "extension_key" => plain(&config.extension_key),
        _ => {
            return Err(TailorError::Validation(format!(
                "Unknown configuration key: '{}'. Use 'tailor config keys' to see available keys",
                key
            )))
        }
    };
    Ok(value)
}

fn run(args: &ConfigArgs, config: &Config, output: &mut dyn Write) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            writeln!(output, "Current configuration:")?;
            for (key, _) in KEYS {
                writeln!(output, "  {}: {}", key, value_of(config, key)?)?;
            }
            writeln!(output, "  api_base_url: {}", config.api_base_url()?)?;
        }
        ConfigCommands::Get { key } => {
            writeln!(output, "{}", value_of(config, key)?)?;
        }
        ConfigCommands::Path => {
            writeln!(output, "{}", Config::config_path()?.display())?;
        }
        ConfigCommands::Keys => {
            for (key, description) in KEYS {
                writeln!(output, "{:<16} {}", key, description)?;
            }
        }
    }
    Ok(())
}

pub async fn execute(args: ConfigArgs, config: &Config) -> Result<i32> {
    let mut stdout = io::stdout();
    run(&args, config, &mut stdout)?;
    Ok(0)
}
