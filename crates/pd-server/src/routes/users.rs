//! User selection, login and logout.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use pd_core::Identity;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;
use crate::session::Session;

/// A selectable identity. The avatar is passed through as the server
/// returns it, without signing.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub title: String,
    pub login_name: String,
    pub thumb_url: Option<String>,
    pub admin: bool,
    pub restricted: bool,
}

impl From<Identity> for UserView {
    fn from(identity: Identity) -> Self {
        Self {
            login_name: identity.login_name().to_string(),
            title: identity.title,
            thumb_url: identity.thumb,
            admin: identity.admin,
            restricted: identity.restricted,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserSelectPage {
    pub server_title: String,
    pub is_online: bool,
    pub users: Vec<UserView>,
}

/// GET /
///
/// The admin account first, then every user it shares the server with.
pub async fn user_select(State(ctx): State<AppContext>) -> Result<Json<UserSelectPage>, AppError> {
    let server = ctx.server.get()?;

    let (account, users, is_online) =
        tokio::join!(server.account(), server.users(), ctx.probe.is_online());

    let users = std::iter::once(account?)
        .chain(users?)
        .map(UserView::from)
        .collect();

    Ok(Json(UserSelectPage {
        server_title: ctx.server_title().to_string(),
        is_online,
        users,
    }))
}

/// GET /login/{username}
///
/// Stores the name without checking it; an unknown user is caught by the
/// resolver on the next protected request.
pub async fn login(
    State(ctx): State<AppContext>,
    jar: CookieJar,
    Path(username): Path<String>,
) -> impl IntoResponse {
    tracing::info!("Selecting user '{}'", username);
    let jar = ctx.sessions.write(jar, &Session::for_user(username));
    (jar, Redirect::to("/home"))
}

/// GET /logout
pub async fn logout(State(ctx): State<AppContext>, jar: CookieJar) -> impl IntoResponse {
    (ctx.sessions.clear(jar), Redirect::to("/"))
}
