//! Application startup and server initialization.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::routes;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to declare the task metrics: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error("could not bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Builds the state and router, binds the listener and serves until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the metric descriptor is invalid, the address cannot be
/// bound, or the server fails while running.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), StartupError> {
    let state = AppState::from_config(config.clone())?;
    let app = routes::create_router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    info!(
        event_name = "server.started",
        event_domain = "server",
        listen_address = address.as_str(),
        druid_uri = config.druid_uri.as_str(),
        "The server is listening on {} and scraping {}",
        address,
        config.druid_uri
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    info!(
        event_name = "server.stopped",
        event_domain = "server",
        "server shut down"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {}", e);
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
                tracing::warn!("failed to listen for SIGTERM: {}", e);
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
}
