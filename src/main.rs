use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::debug;

mod cli;
mod config;
mod core;
mod error;
mod services;
mod utils;

use cli::{extension, management, query, token};
use config::Config;
use error::Result;
use services::{ServiceProvider, SimpleServices};

#[derive(Parser)]
#[command(name = "tailor")]
#[command(about = "Command-line client for the TYPO3 Extension Repository (TER)")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new access token
    #[command(name = "ter:token:create")]
    TokenCreate(token::create::CreateTokenArgs),

    /// Refresh an access token
    #[command(name = "ter:token:refresh")]
    TokenRefresh(token::refresh::RefreshTokenArgs),

    /// Revoke an access token
    #[command(name = "ter:token:revoke")]
    TokenRevoke(token::revoke::RevokeTokenArgs),

    /// Register a new extension key in TER
    #[command(name = "ter:register")]
    Register(extension::register::RegisterArgs),

    /// Update the meta information of an extension
    #[command(name = "ter:update")]
    Update(extension::update::UpdateArgs),

    /// Transfer ownership of an extension key to another user
    #[command(name = "ter:transfer")]
    Transfer(extension::transfer::TransferArgs),

    /// Delete an extension from TER
    #[command(name = "ter:delete")]
    Delete(extension::delete::DeleteArgs),

    /// Publish a new version of an extension to TER
    #[command(name = "ter:publish")]
    Publish(extension::publish::PublishArgs),

    /// Fetch details about an extension
    #[command(name = "ter:details")]
    Details(query::details::DetailsArgs),

    /// List the published versions of an extension
    #[command(name = "ter:versions")]
    Versions(query::versions::VersionsArgs),

    /// Fetch details about a single version of an extension
    #[command(name = "ter:version")]
    Version(query::version::VersionArgs),

    /// Search extensions in TER
    #[command(name = "ter:find")]
    Find(query::find::FindArgs),

    /// Set the version in ext_emconf.php and the documentation settings
    #[command(name = "set-version")]
    SetVersion(extension::set_version::SetVersionArgs),

    /// Show configuration
    Config(management::config::ConfigArgs),
}

async fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    debug!("Using TER instance {}", config.remote_base_uri);
    let services = SimpleServices::new(config);

    match cli.command {
        Commands::TokenCreate(args) => token::create::execute(args, &services).await,
        Commands::TokenRefresh(args) => token::refresh::execute(args, &services).await,
        Commands::TokenRevoke(args) => token::revoke::execute(args, &services).await,
        Commands::Register(args) => extension::register::execute(args, &services).await,
        Commands::Update(args) => extension::update::execute(args, &services).await,
        Commands::Transfer(args) => extension::transfer::execute(args, &services).await,
        Commands::Delete(args) => extension::delete::execute(args, &services).await,
        Commands::Publish(args) => extension::publish::execute(args, &services).await,
        Commands::Details(args) => query::details::execute(args, &services).await,
        Commands::Versions(args) => query::versions::execute(args, &services).await,
        Commands::Version(args) => query::version::execute(args, &services).await,
        Commands::Find(args) => query::find::execute(args, &services).await,
        Commands::SetVersion(args) => extension::set_version::execute(args).await,
        Commands::Config(args) => management::config::execute(args, &services.config()).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = utils::logging::init_logging(cli.verbose) {
        eprintln!("{}", e);
    }

    match run(cli).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_namespaced_commands() {
        let cli = Cli::parse_from([
            "tailor",
            "ter:publish",
            "1.2.0",
            "news",
            "--artefact=news_1.2.0.zip",
            "-r",
        ]);
        match cli.command {
            Commands::Publish(args) => {
                assert_eq!(args.version, "1.2.0");
                assert_eq!(args.key.as_deref(), Some("news"));
                assert!(args.common.is_raw());
                assert_eq!(args.path, std::path::PathBuf::from("."));
            }
            _ => panic!("expected ter:publish"),
        }

        let cli = Cli::parse_from(["tailor", "-v", "ter:delete", "news", "--force"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Delete(ref args) if args.common.is_forced()));
    }
}
