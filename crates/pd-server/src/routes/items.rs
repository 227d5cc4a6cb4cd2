//! Item details and watched-state toggles.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Extension, Json};
use futures::future::try_join_all;
use pd_core::{MediaKind, RatingKey};
use pd_plex::UserLibrary;
use serde::Serialize;

use super::{fetch_existing, parse_rating_key, sign_all, ItemView};
use crate::context::AppContext;
use crate::error::AppError;
use crate::user_context::UserScope;

/// A season of a show together with its episodes.
#[derive(Debug, Serialize)]
pub struct SeasonView {
    #[serde(flatten)]
    pub season: ItemView,
    pub episodes: Vec<ItemView>,
}

#[derive(Debug, Serialize)]
pub struct ItemPage {
    pub server_title: String,
    pub is_online: bool,
    pub item: ItemView,
    /// Populated for shows only.
    pub seasons: Vec<SeasonView>,
}

/// GET /item/{rating_key}
pub async fn item_details(
    State(ctx): State<AppContext>,
    Extension(scope): Extension<UserScope>,
    Path(raw_key): Path<String>,
) -> Result<Json<ItemPage>, AppError> {
    let rating_key = parse_rating_key(&raw_key)?;
    let library = scope.library.as_ref();

    let (is_online, item) = tokio::join!(
        ctx.probe.is_online(),
        fetch_existing(library, rating_key),
    );
    let item = item?;

    let seasons = if item.kind == MediaKind::Show {
        show_seasons(library, rating_key, &ctx).await?
    } else {
        Vec::new()
    };

    Ok(Json(ItemPage {
        server_title: ctx.server_title().to_string(),
        is_online,
        item: ItemView::with_art(item, &ctx.signer),
        seasons,
    }))
}

async fn show_seasons(
    library: &dyn UserLibrary,
    show: RatingKey,
    ctx: &AppContext,
) -> pd_core::Result<Vec<SeasonView>> {
    let seasons = library.children(show).await?;
    let episodes = try_join_all(seasons.iter().map(|s| library.children(s.rating_key))).await?;

    Ok(seasons
        .into_iter()
        .zip(episodes)
        .map(|(season, episodes)| SeasonView {
            season: ItemView::with_thumb(season, &ctx.signer),
            episodes: sign_all(episodes, &ctx.signer),
        })
        .collect())
}

/// GET /item/{rating_key}/mark_watched
pub async fn mark_watched(
    Extension(scope): Extension<UserScope>,
    Path(raw_key): Path<String>,
) -> Result<Redirect, AppError> {
    set_watched(&scope, &raw_key, true).await
}

/// GET /item/{rating_key}/mark_unwatched
pub async fn mark_unwatched(
    Extension(scope): Extension<UserScope>,
    Path(raw_key): Path<String>,
) -> Result<Redirect, AppError> {
    set_watched(&scope, &raw_key, false).await
}

async fn set_watched(scope: &UserScope, raw_key: &str, watched: bool) -> Result<Redirect, AppError> {
    let rating_key = parse_rating_key(raw_key)?;
    let library = scope.library.as_ref();

    let item = fetch_existing(library, rating_key).await?;
    if watched {
        library.mark_watched(item.rating_key).await?;
    } else {
        library.mark_unwatched(item.rating_key).await?;
    }
    tracing::debug!(
        user = %scope.username,
        rating_key = %rating_key,
        watched,
        "Updated watched state"
    );

    Ok(Redirect::to(&format!("/item/{rating_key}")))
}
