//! Application context.
//!
//! [`AppContext`] is shared across all route handlers via axum state. It is
//! built once at startup and never mutated afterwards.

use std::sync::Arc;

use pd_core::config::Config;
use pd_core::Result;
use pd_plex::UrlSigner;

use crate::connectivity::ConnectivityProbe;
use crate::handle::ServerHandle;
use crate::session::SessionCodec;

/// Application context shared by all request handlers (via axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Process-wide admin connection (possibly absent).
    pub server: Arc<ServerHandle>,
    /// Signs asset paths with the admin token.
    pub signer: Arc<UrlSigner>,
    /// Internet reachability check.
    pub probe: Arc<ConnectivityProbe>,
    /// Session cookie codec.
    pub sessions: Arc<SessionCodec>,
}

impl AppContext {
    /// Build the remaining collaborators from `config`.
    pub fn new(config: Config, server: ServerHandle) -> Result<Self> {
        let signer = UrlSigner::from_config(&config.plex);
        let probe = ConnectivityProbe::from_config(&config.connectivity);
        let sessions = SessionCodec::from_config(&config.session)?;

        Ok(Self {
            config: Arc::new(config),
            server: Arc::new(server),
            signer: Arc::new(signer),
            probe: Arc::new(probe),
            sessions: Arc::new(sessions),
        })
    }

    /// Server title for page models.
    pub fn server_title(&self) -> &str {
        self.server.display_name()
    }
}
