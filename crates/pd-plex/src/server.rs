//! The admin connection to a Plex Media Server.

use std::sync::Arc;
use std::time::Duration;

use pd_core::config::PlexConfig;
use pd_core::{Identity, Result};
use tokio::sync::OnceCell;

use crate::api::{Lookup, MediaServer, UserLibrary};
use crate::http::{build_client, ClientHeaders, Endpoint};
use crate::library::PlexLibrary;
use crate::myplex::MyPlexClient;
use crate::wire::{Envelope, ServerInfo};

/// A live, admin-authenticated connection to one media server.
#[derive(Debug, Clone)]
pub struct PlexServer {
    endpoint: Endpoint,
    myplex: MyPlexClient,
    friendly_name: String,
    machine_identifier: String,
    /// The admin account never changes for a given token.
    account: Arc<OnceCell<Identity>>,
}

impl PlexServer {
    /// Connect using the configured URL, token and timeout.
    pub async fn connect(config: &PlexConfig) -> Result<Self> {
        let client = build_client(Duration::from_secs(config.timeout_secs));
        let headers = ClientHeaders::from(config);

        let endpoint = Endpoint::new(
            client.clone(),
            &config.url,
            config.token.clone(),
            headers.clone(),
            "plex",
        );
        let myplex = MyPlexClient::new(Endpoint::new(
            client,
            &config.myplex_url,
            config.token.clone(),
            headers,
            "plex.tv",
        ));

        let info: Envelope<ServerInfo> = endpoint.get("/", &[]).await?;
        let info = info.media_container;

        tracing::debug!(
            machine_identifier = %info.machine_identifier,
            version = info.version.as_deref().unwrap_or("unknown"),
            "Connected to media server"
        );

        Ok(Self {
            endpoint,
            myplex,
            friendly_name: info.friendly_name,
            machine_identifier: info.machine_identifier,
            account: Arc::new(OnceCell::new()),
        })
    }

    pub fn machine_identifier(&self) -> &str {
        &self.machine_identifier
    }

    /// The admin identity, fetched from plex.tv on first use.
    async fn cached_account(&self) -> Result<&Identity> {
        self.account
            .get_or_try_init(|| self.myplex.account())
            .await
    }

    fn library_with_token(&self, token: impl Into<String>) -> Arc<dyn UserLibrary> {
        Arc::new(PlexLibrary::new(self.endpoint.with_token(token)))
    }
}

#[async_trait::async_trait]
impl MediaServer for PlexServer {
    fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    async fn account(&self) -> Result<Identity> {
        self.cached_account().await.cloned()
    }

    async fn users(&self) -> Result<Vec<Identity>> {
        let admin_id = self.cached_account().await?.id;
        let users = self.myplex.users().await?;
        Ok(users.into_iter().filter(|u| u.id != admin_id).collect())
    }

    async fn switch_user(&self, username: &str) -> Result<Lookup<Arc<dyn UserLibrary>>> {
        let account = self.cached_account().await?;
        if account.matches(username) {
            return Ok(Lookup::Found(
                self.library_with_token(self.endpoint.token()),
            ));
        }
        let admin_id = account.id;

        let users = self.myplex.users().await?;
        let Some(user) = users
            .into_iter()
            .find(|u| u.id != admin_id && u.matches(username))
        else {
            tracing::debug!("No shared user named '{}'", username);
            return Ok(Lookup::NotFound);
        };

        Ok(self
            .myplex
            .shared_server_token(&self.machine_identifier, user.id)
            .await?
            .map(|token| self.library_with_token(token)))
    }
}
