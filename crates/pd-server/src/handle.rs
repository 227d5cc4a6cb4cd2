//! The process-wide media server handle.

use std::sync::Arc;

use pd_core::config::PlexConfig;
use pd_core::{Error, Result};
use pd_plex::{MediaServer, PlexServer};

/// Title shown when the startup connection failed.
pub const CONNECTION_FAILED_TITLE: &str = "Plex Server (Connection Failed)";

/// Admin connection established once at startup and only read afterwards.
///
/// A failed connection leaves the handle empty: the process keeps serving,
/// and every operation that needs the server reports
/// [`Error::ServerUnavailable`].
pub struct ServerHandle {
    server: Option<Arc<dyn MediaServer>>,
    title: String,
}

impl ServerHandle {
    /// Connect to the configured server. Never fails.
    pub async fn connect(config: &PlexConfig) -> Self {
        tracing::info!("Connecting to media server at {} as admin", config.url);
        match PlexServer::connect(config).await {
            Ok(server) => {
                tracing::info!("Connected to '{}'", server.friendly_name());
                Self::connected(Arc::new(server))
            }
            Err(e) => {
                tracing::error!("Could not connect to media server: {e}");
                Self::disconnected()
            }
        }
    }

    pub fn connected(server: Arc<dyn MediaServer>) -> Self {
        let title = server.friendly_name().to_string();
        Self {
            server: Some(server),
            title,
        }
    }

    pub fn disconnected() -> Self {
        Self {
            server: None,
            title: CONNECTION_FAILED_TITLE.to_string(),
        }
    }

    pub fn get(&self) -> Result<&Arc<dyn MediaServer>> {
        self.server.as_ref().ok_or(Error::ServerUnavailable)
    }

    pub fn display_name(&self) -> &str {
        &self.title
    }

    pub fn is_connected(&self) -> bool {
        self.server.is_some()
    }
}
