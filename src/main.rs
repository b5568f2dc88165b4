mod cli;

use clap::Parser;
use cli::{Cli, CliError, Commands};
use integrations_client::{
    Integration, IntegrationStore,
    config::{Config, DEFAULT_CONFIG_FILE},
};
use mimalloc::MiMalloc;
use serde_json::Value;
use std::{path::PathBuf, process::ExitCode};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let cfg = Config::load(&config_path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    debug!(config = %config_path.display(), loglevel = %cfg.basic.loglevel, "Configuration loaded");

    let store = IntegrationStore::from_config(&cfg)?;
    let output = run(&store, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    if store.is_error() {
        warn!("Integrations backend request failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

async fn run(store: &IntegrationStore, command: Commands) -> Result<Value, CliError> {
    match command {
        Commands::List { only_enabled } => {
            store.list(only_enabled).await;
            Ok(serde_json::to_value(store.integrations())?)
        }
        Commands::Create { json } => {
            let payload: Integration = serde_json::from_str(&json)?;
            store.create(payload).await;
            Ok(serde_json::to_value(store.integrations().last())?)
        }
        Commands::Update { id, json } => {
            let patch = cli::parse_patch(&json)?;
            // Local mutations need the record present.
            store.list(false).await;
            store.update(id, patch).await;
            Ok(serde_json::to_value(store.get(id))?)
        }
        Commands::Delete { id } => {
            store.list(false).await;
            store.delete(id).await;
            Ok(serde_json::to_value(store.integrations())?)
        }
        Commands::Install { id } => {
            store.list(false).await;
            let result = store.install(id).await;
            Ok(serde_json::to_value(result)?)
        }
        Commands::Frontend { id } => {
            let locator = store.fetch_frontend_module(id).await;
            Ok(serde_json::to_value(locator)?)
        }
    }
}
