//! Serve command - Starts the HTTP server.

use std::future::Future;

use tokio::signal;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // One pool for the whole process, migrated on connect
    let database = Database::connect(&config).await?;
    tracing::info!("Database connected");

    let app = create_router(AppState::from_config(database.clone(), &config));

    let host = args.host.unwrap_or_else(|| config.server_host.clone());
    let port = args.port.unwrap_or(config.server_port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)));

    database.close().await?;
    tracing::info!("Database connection closed");

    served
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = signal_or_pending("Ctrl+C", signal::ctrl_c());

    #[cfg(unix)]
    let terminate = signal_or_pending("SIGTERM", async {
        let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        stream.recv().await;
        Ok::<(), std::io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Wait for `listener` to fire. A listener that could not be installed
/// never resolves, so only a real signal stops the server.
async fn signal_or_pending<E>(name: &str, listener: impl Future<Output = Result<(), E>>)
where
    E: std::fmt::Display,
{
    if let Err(e) = listener.await {
        tracing::error!(error = %e, "Failed to listen for {}", name);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_failed_listener_never_resolves() {
        let failing = async { Err::<(), _>(std::io::Error::other("no signal handler")) };

        let waited = timeout(
            Duration::from_millis(50),
            signal_or_pending("Ctrl+C", failing),
        )
        .await;

        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_fired_listener_resolves() {
        let fired = async { Ok::<(), std::io::Error>(()) };

        let waited = timeout(
            Duration::from_millis(50),
            signal_or_pending("SIGTERM", fired),
        )
        .await;

        assert!(waited.is_ok());
    }
}
