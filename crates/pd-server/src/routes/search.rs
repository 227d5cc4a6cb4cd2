//! Library search.

use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use super::{sign_all, ItemView};
use crate::context::AppContext;
use crate::error::AppError;
use crate::user_context::UserScope;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub server_title: String,
    pub is_online: bool,
    pub query: String,
    pub results: Vec<ItemView>,
}

/// GET /search?query=...
///
/// A blank query skips the server entirely.
pub async fn search(
    State(ctx): State<AppContext>,
    Extension(scope): Extension<UserScope>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchPage>, AppError> {
    let query = params.query.unwrap_or_default();

    let (is_online, results) = if query.trim().is_empty() {
        (ctx.probe.is_online().await, Vec::new())
    } else {
        let (is_online, results) =
            tokio::join!(ctx.probe.is_online(), scope.library.search(query.trim()));
        (is_online, results?)
    };

    Ok(Json(SearchPage {
        server_title: ctx.server_title().to_string(),
        is_online,
        query,
        results: sign_all(results, &ctx.signer),
    }))
}
