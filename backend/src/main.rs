
use std::sync::Arc;
use tracing::info;

mod api;
mod coalescer;
mod config;
mod error;
mod provider_client;
mod strategy;
mod types;

use api::AppState;
use config::Config;
use provider_client::ProviderClient;
use strategy::CoalesceStrategy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (print debug messages)
    tracing_subscriber::fmt::init();

    tracing::info!("🚀 Starting Coalesce Backend Service...");

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // The configured default must resolve against the strategy registry
    config
        .coalesce
        .default_strategy
        .parse::<CoalesceStrategy>()?;

    info!(
        "Configured {} providers, default strategy '{}'",
        config.coalesce.api_urls.len(),
        config.coalesce.default_strategy
    );

    let providers = ProviderClient::new(&config.coalesce)?;

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let state = AppState {
        config: Arc::new(config),
        providers: Arc::new(providers),
    };

    let app = api::create_router(state);

    info!("🌐 Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
