//! pd-server: the HTTP front end.
//!
//! This crate ties the media server client to an axum application. It
//! provides:
//!
//! - the process-wide server handle, established once at startup
//! - signed-cookie sessions and the per-request user context resolver
//! - route handlers that return JSON page models
//! - graceful shutdown via signal handling

pub mod connectivity;
pub mod context;
pub mod error;
pub mod handle;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod session;
pub mod user_context;

use std::net::SocketAddr;

use pd_core::config::Config;

use crate::context::AppContext;
use crate::handle::ServerHandle;

/// Start the plexdeck server.
///
/// Connects to the configured media server (degrading instead of failing
/// when it is unreachable), builds the [`AppContext`] and serves HTTP until
/// a shutdown signal arrives.
pub async fn start(config: Config) -> pd_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let server = ServerHandle::connect(&config.plex).await;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| pd_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let static_dir = config.server.static_dir.clone();
    let ctx = AppContext::new(config, server)?;
    let app = router::build_router(ctx, static_dir);

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| pd_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
