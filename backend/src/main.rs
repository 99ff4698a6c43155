//! Main entry point for the class feedback backend.
//!
//! This file initializes logging and configuration, prepares the lazily
//! connected database handle, and serves the router behind the session gate.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod pages;
mod repositories;
mod services;
mod state;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::Config;
use state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(&config));

    // Warm the pool in the background; requests still connect on demand if this fails.
    let db = state.db.clone();
    tokio::spawn(async move {
        if let Err(e) = db.pool().await {
            warn!("Database not ready at startup: {:#}", e);
        }
    });

    let app = api::router(state.clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!(
        "Starting class feedback server on port {} ({:?})",
        config.server_port, config.environment
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    state.db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
