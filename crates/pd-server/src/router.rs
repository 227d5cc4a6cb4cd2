//! Axum router construction.
//!
//! Builds the application router with the public and protected route
//! groups, middleware layers, and optional static file serving.

use std::path::PathBuf;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::middleware::user_context::user_context_middleware;
use crate::routes;

/// Build the complete axum router.
pub fn build_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    // Reachable without an active user.
    let public_routes = Router::new()
        .route("/", get(routes::users::user_select))
        .route("/login/{username}", get(routes::users::login))
        .route("/logout", get(routes::users::logout))
        .route("/health", get(routes::health::health));

    // Everything here runs after the user context resolver.
    let protected_routes = Router::new()
        .route("/home", get(routes::dashboard::home))
        .route("/item/{rating_key}", get(routes::items::item_details))
        .route(
            "/item/{rating_key}/mark_watched",
            get(routes::items::mark_watched),
        )
        .route(
            "/item/{rating_key}/mark_unwatched",
            get(routes::items::mark_unwatched),
        )
        .route("/player/{rating_key}", get(routes::player::player))
        .route("/search", get(routes::search::search))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            user_context_middleware,
        ));

    let mut app = Router::new().merge(public_routes).merge(protected_routes);

    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {}", dir.display());
            app = app.nest_service("/static", ServeDir::new(dir));
        } else {
            tracing::warn!("Static directory {} does not exist", dir.display());
        }
    }

    app.layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
