mod config;
mod error;
mod handlers;
mod routes;
mod state;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

const DEFAULT_LOG_FILTER: &str =
    "conformity=info,conformity_ai=info,conformity_store=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("conformity v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::parse();

    // Model loading reads weights from disk; keep it off the async workers.
    let state = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || AppState::from_config(&config)).await??
    };

    match state.chat.list_models().await {
        Ok(models) => info!(?models, "available chat models"),
        Err(e) => warn!(error = %e, url = %config.ollama_url, "could not reach chat service"),
    }

    let app = routes::create_router(state);
    let listener = TcpListener::bind(&config.address)
        .await
        .with_context(|| format!("binding {}", config.address))?;
    info!(address = %config.address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
