//! chores-api - read-only HTTP API over a chores database.

use chores_api::config::{self, Config};
use chores_api::db::PgStore;
use chores_api::http::{AppState, run_http_server};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Optional config file, then environment overrides
    let config_path = std::env::args().nth(1);
    let config = match &config_path {
        Some(path) => Config::load(path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => Config::default(),
    }
    .with_env()?;

    for warning in config::validate(&config) {
        warn!("{}", warning);
    }

    info!(
        listen = %config.server.listen,
        api_key = config.auth.api_key.as_ref().is_some_and(|k| !k.is_empty()),
        database = config.database.url.is_some(),
        ssl_mode = ?config.database.ssl_mode,
        "Starting chores-api"
    );

    let store = PgStore::new(&config.database)?;
    let state = AppState::new(Arc::new(store), config.auth.api_key.clone());

    let listener = TcpListener::bind(config.server.listen).await.map_err(|e| {
        error!(addr = %config.server.listen, error = %e, "Failed to bind HTTP listener");
        e
    })?;

    run_http_server(listener, state, shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
