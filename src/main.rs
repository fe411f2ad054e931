//! Agent Newsroom — Binary Entrypoint
//! Boots the Axum HTTP server, wiring agent registry, store, and metrics.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use agent_newsroom::agent::AgentRegistry;
use agent_newsroom::config::ServiceConfig;
use agent_newsroom::metrics::Metrics;
use agent_newsroom::store::FileStore;
use agent_newsroom::{api, AppState};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("agent_newsroom=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    // Missing required configuration is fatal: fail startup, do not serve.
    let config = ServiceConfig::from_env().context("service configuration")?;

    let metrics = Metrics::init();

    // Store and registry live for the whole process and are shared across
    // all requests.
    let store = Arc::new(FileStore::open(&config.data_dir).context("open news store")?);
    let registry = Arc::new(AgentRegistry::new(config.agent.clone()));

    let state = AppState { registry, store };
    let app = api::router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "agent newsroom API starting up");

    axum::serve(listener, app).await.context("server exited")?;

    info!("agent newsroom API shutdown complete");
    Ok(())
}
