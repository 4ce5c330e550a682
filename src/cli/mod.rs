//! Command Line Interface module
//!
//! Commands are grouped by what they act on:
//! - `token`: access token handling (create, refresh, revoke)
//! - `extension`: changes to an extension (register, update, transfer, delete, publish, set-version)
//! - `query`: read-only lookups (details, versions, version, find)
//! - `management`: local configuration

pub mod extension;
pub mod management;
pub mod query;
pub mod token;

use crate::config::Config;
use crate::core::command::{self, ClientRequestCommand, CommonOptions};
use crate::core::validation::resolve_extension_key;
use crate::error::Result;
use crate::services::SimpleServices;

/// Resolve the extension key from argument, configuration or `composer.json`
pub fn extension_key(argument: Option<&str>, config: &Config) -> Result<String> {
    let working_dir = std::env::current_dir()?;
    resolve_extension_key(argument, config.extension_key.as_deref(), &working_dir)
}

/// Run a request command against the configured TER instance
pub async fn run_request<C: ClientRequestCommand>(
    command: C,
    options: &CommonOptions,
    services: &SimpleServices,
) -> Result<i32> {
    let context = services.create_context()?;
    Ok(command::execute(&command, options, context).await)
}
