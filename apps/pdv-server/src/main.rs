//! # Mini PDV Server
//!
//! Entry point: logging, configuration, database, router, graceful shutdown.
//!
//! ```text
//! ServerConfig::load() ─► Database::new() ─► build_router() ─► axum::serve()
//!                          (migrations)                          │
//!                                                  Ctrl+C / SIGTERM
//!                                                                ▼
//!                                                          db.close()
//! ```

use pdv_db::Database;
use pdv_server::{build_router, AppState, ServerConfig, DEFAULT_LOG_FILTER};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting Mini PDV server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        addr = %config.bind_address(),
        database = %config.database_path.display(),
        static_dir = %config.static_dir.display(),
        "Configuration loaded"
    );

    // Open database (creates the file and schema on first start)
    let db = Database::new(config.db_config()).await?;
    info!("Database ready");

    let app = build_router(AppState::new(db.clone(), config.static_dir.clone()));

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
