//! GeoYIELD Farm Analytics - Backend Server
//!
//! Loads the generated farm dataset and serves the dashboard, report and
//! trend views computed by the shared aggregation pipeline.

use std::net::SocketAddr;

use anyhow::Context;
use geoyield_backend::{create_app, init_tracing, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("geoyield_server=debug,geoyield_backend=debug,tower_http=debug");

    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting GeoYIELD server");
    tracing::info!("Environment: {}", config.environment);

    tracing::info!("Loading farm dataset from {}...", config.dataset.path);
    let farms = shared::dataset::load_dataset(&config.dataset.path).with_context(|| {
        format!(
            "could not load {}; run geoyield-gen first",
            config.dataset.path
        )
    })?;
    tracing::info!(records = farms.len(), "Farm dataset loaded");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server.host / server.port")?;

    let app = create_app(AppState::new(farms, config));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
