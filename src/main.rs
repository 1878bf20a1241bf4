/// Aeminium Identity Service - main entry point.
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use aeminium_identity::{
    config::Settings, db::users::InMemoryUserDirectory, http, security::TokenIssuer, telemetry,
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    info!("Starting Aeminium Identity Service");

    let settings = Settings::load().context("Failed to load configuration")?;
    info!("Configuration loaded");

    // Without a parseable signing key the service must not accept login
    // traffic, so a load failure aborts startup.
    let tokens = TokenIssuer::load(&settings.jwt).context("Failed to load JWT signing keys")?;
    info!("JWT signing keys loaded");

    let state = AppState {
        users: Arc::new(InMemoryUserDirectory::new()),
        tokens: Arc::new(tokens),
        settings: Arc::new(settings.clone()),
    };

    let app = http::build_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("REST API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("Shutdown signal received");
}
