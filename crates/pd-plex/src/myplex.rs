//! plex.tv account client: the admin account, the users it shares with, and
//! the per-user server tokens handed out through library sharing.

use pd_core::{Identity, Result};
use reqwest::Method;

use crate::api::Lookup;
use crate::http::Endpoint;
use crate::wire::{AccountInfo, AccountUser, Envelope, SharedServerList, UserList};

/// Client for the plex.tv account API, authenticated as the admin.
#[derive(Debug, Clone)]
pub struct MyPlexClient {
    endpoint: Endpoint,
}

impl MyPlexClient {
    pub(crate) fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// The account owning the admin token.
    pub async fn account(&self) -> Result<Identity> {
        let info: AccountInfo = self.endpoint.get("/api/v2/user", &[]).await?;
        Ok(info.into_identity())
    }

    /// Every user the admin shares with: home members, managed users and
    /// friends outside the Home.
    pub async fn users(&self) -> Result<Vec<Identity>> {
        let list: Envelope<UserList> = self.endpoint.get("/api/users", &[]).await?;
        Ok(list
            .media_container
            .users
            .into_iter()
            .map(AccountUser::into_identity)
            .collect())
    }

    /// The access token `user_id` holds for the given server, read from the
    /// admin's share list. Needs no PIN, so protected home users resolve too.
    pub async fn shared_server_token(
        &self,
        machine_identifier: &str,
        user_id: u64,
    ) -> Result<Lookup<String>> {
        let path = format!("/api/servers/{machine_identifier}/shared_servers");
        let shared: Lookup<Envelope<SharedServerList>> =
            self.endpoint.fetch(Method::GET, &path, &[]).await?;

        let token = shared
            .found()
            .and_then(|list| list.media_container.token_for(user_id));

        tracing::debug!(
            found = token.is_some(),
            "Resolved shared server token for user {} on {}",
            user_id,
            machine_identifier
        );

        Ok(match token {
            Some(t) => Lookup::Found(t),
            None => Lookup::NotFound,
        })
    }
}
