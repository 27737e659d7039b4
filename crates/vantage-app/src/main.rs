//! Vantage application binary - composition root.
//!
//! Ties together all Vantage crates into a single executable:
//! 1. Parse the CLI and load configuration from TOML
//! 2. Build the reqwest-backed analyst and executor adapters
//! 3. Assemble the orchestrator state
//! 4. Start the axum REST API server

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use vantage_analyst::HttpAnalystClient;
use vantage_api::AppState;
use vantage_core::VantageConfig;
use vantage_query::HttpSqlExecutor;

#[derive(Debug, Parser)]
#[command(name = "vantage", version, about = "Conversational analytics service")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured API port.
    #[arg(long)]
    port: Option<u16>,
}

/// Resolve the config file path (CLI flag, VANTAGE_CONFIG env, or
/// ~/.vantage/config.toml).
fn config_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.config {
        return path.clone();
    }
    if let Ok(path) = std::env::var("VANTAGE_CONFIG") {
        return PathBuf::from(path);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".vantage").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Config first: the log filter default comes from it.
    let config_file = config_path(&cli);
    let mut config = VantageConfig::load_or_default(&config_file);
    if let Some(port) = cli.port {
        config.general.port = port;
    }

    // Tracing: RUST_LOG wins, the configured level is the fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.general.log_level.clone())
            }),
        )
        .init();

    tracing::info!("Starting Vantage v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Backend adapters.
    let analyst = Arc::new(HttpAnalystClient::new(&config.analyst)?);
    let executor = Arc::new(HttpSqlExecutor::new(&config.executor)?);
    tracing::info!(
        analyst = %config.analyst.base_url,
        executor = %config.executor.base_url,
        "Backend adapters ready"
    );

    // Orchestrator + session state behind the API.
    let state = AppState::new(config.clone(), analyst, executor);

    vantage_api::start_server(&config, state).await?;

    Ok(())
}
