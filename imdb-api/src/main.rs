//! imdb-api - IMDB movie REST service entry point
//!
//! Loads the TOML configuration, opens the SQLite movie store and serves
//! the HTTP API until Ctrl+C or SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use imdb_api::cli::Args;
use imdb_api::logging::init_logging;
use imdb_api::{build_router, AppState};
use imdb_common::config::TomlConfig;
use imdb_common::db::{init_database, SqliteMovieStore};
use imdb_common::MovieStore;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = TomlConfig::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    let config_found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    if let Some(port) = args.port {
        config.app.port = port;
    }

    init_logging(&config.app);

    info!(
        "Starting IMDB Movie REST Service (imdb-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if config_found {
        info!("Loaded configuration from {}", args.config.display());
    } else {
        warn!(
            "Config file {} not found, using built-in defaults",
            args.config.display()
        );
    }

    info!("Log file: {}", config.app.log_file().display());
    info!("Database path: {}", config.database.path.display());
    info!("Default year: {}", config.settings.default_year);
    info!(
        "Maximum upload size: {} Bytes",
        config.settings.max_upload_bytes()
    );

    let pool = init_database(&config.database.path)
        .await
        .context("Failed to initialize database")?;
    let store = SqliteMovieStore::new(pool);
    match store.count().await {
        Ok(count) => info!("✓ Movie store ready ({} movies)", count),
        Err(e) => error!("Failed to count stored movies: {}", e),
    }

    let addr = config.app.bind_addr();
    let state = AppState::new(Arc::new(store), config.settings, config.app);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("imdb-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
