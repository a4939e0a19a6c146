use std::sync::Arc;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use eventmap::adapters::{FileCredentialStore, ReqwestHttpClient};
use eventmap::auth::AuthenticatedClient;
use eventmap::cli::{handle_version_command, parse_args, run_cli_command, CliCommand, USAGE};
use eventmap::config::ClientConfig;

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    // Handle informational commands before any initialization
    match command {
        CliCommand::Version => {
            handle_version_command();
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        _ => {}
    }

    color_eyre::install()?;
    init_logging();

    let config = ClientConfig::from_env();
    tracing::debug!("Using API at {}", config.base_url);

    let http = ReqwestHttpClient::with_timeout(config.timeout)
        .wrap_err("Failed to build HTTP client")?;
    let store = FileCredentialStore::new().wrap_err("Failed to locate credential store")?;

    let client = AuthenticatedClient::new(config, Arc::new(http), Arc::new(store));
    run_cli_command(command, &client).await
}
