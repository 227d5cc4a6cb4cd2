//! Maps a session to a library handle scoped to the session's user.

use std::sync::Arc;

use pd_core::Result;
use pd_plex::{Lookup, UserLibrary};

use crate::handle::ServerHandle;
use crate::session::Session;

/// The active user of a request, inserted into request extensions by
/// [`crate::middleware::user_context::user_context_middleware`].
#[derive(Clone)]
pub struct UserScope {
    pub username: String,
    pub library: Arc<dyn UserLibrary>,
}

/// Resolve the session's user against the admin connection.
///
/// Returns `Ok(None)` when the session is anonymous or names an identity the
/// server does not know. An absent admin connection and transport failures
/// are errors.
pub async fn resolve(handle: &ServerHandle, session: &Session) -> Result<Option<UserScope>> {
    let server = handle.get()?;

    let Some(username) = session.username.as_deref().filter(|u| !u.is_empty()) else {
        return Ok(None);
    };

    match server.switch_user(username).await? {
        Lookup::Found(library) => Ok(Some(UserScope {
            username: username.to_string(),
            library,
        })),
        Lookup::NotFound => {
            tracing::warn!("Session user '{}' does not exist on the server", username);
            Ok(None)
        }
    }
}
