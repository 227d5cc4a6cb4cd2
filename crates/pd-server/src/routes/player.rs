//! Player page.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Serialize;

use super::{fetch_existing, parse_rating_key, ItemView};
use crate::context::AppContext;
use crate::error::AppError;
use crate::user_context::UserScope;

#[derive(Debug, Serialize)]
pub struct PlayerPage {
    pub item: ItemView,
    pub stream_url: String,
}

/// GET /player/{rating_key}
pub async fn player(
    State(ctx): State<AppContext>,
    Extension(scope): Extension<UserScope>,
    Path(raw_key): Path<String>,
) -> Result<Json<PlayerPage>, AppError> {
    let rating_key = parse_rating_key(&raw_key)?;
    let item = fetch_existing(scope.library.as_ref(), rating_key).await?;
    let stream_url = scope.library.stream_url(&item)?;

    Ok(Json(PlayerPage {
        item: ItemView::with_art(item, &ctx.signer),
        stream_url,
    }))
}
