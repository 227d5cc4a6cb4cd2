//! The signed-in user's home page.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use super::{sign_all, ItemView};
use crate::context::AppContext;
use crate::error::AppError;
use crate::user_context::UserScope;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub server_title: String,
    pub is_online: bool,
    pub username: String,
    pub on_deck: Vec<ItemView>,
    pub recently_added: Vec<ItemView>,
}

/// GET /home
pub async fn home(
    State(ctx): State<AppContext>,
    Extension(scope): Extension<UserScope>,
) -> Result<Json<HomePage>, AppError> {
    let (is_online, on_deck, recently_added) = tokio::join!(
        ctx.probe.is_online(),
        scope.library.on_deck(),
        scope.library.recently_added(),
    );

    Ok(Json(HomePage {
        server_title: ctx.server_title().to_string(),
        is_online,
        username: scope.username,
        on_deck: sign_all(on_deck?, &ctx.signer),
        recently_added: sign_all(recently_added?, &ctx.signer),
    }))
}
