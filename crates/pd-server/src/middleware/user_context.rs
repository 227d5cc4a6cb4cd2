//! User context middleware.
//!
//! Applied to protected routes only. Resolves the session's user and
//! inserts the resulting [`UserScope`] into request extensions. Requests
//! without an active user are redirected to user selection, and a session
//! naming a user that no longer resolves has its cookie cleared.

use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;
use crate::user_context::{resolve, UserScope};

pub async fn user_context_middleware(
    State(ctx): State<AppContext>,
    jar: CookieJar,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session = ctx.sessions.read(&jar);

    let scope: Option<UserScope> = match resolve(&ctx.server, &session).await {
        Ok(scope) => scope,
        Err(e) => {
            let err = AppError::new(e);
            return Err(match request.extensions().get::<RequestId>() {
                Some(id) => err.with_request_id(id.0.clone()),
                None => err,
            });
        }
    };

    match scope {
        Some(scope) => {
            request.extensions_mut().insert(scope);
            Ok(next.run(request).await)
        }
        None => {
            let jar = if session.username.is_some() {
                ctx.sessions.clear(jar)
            } else {
                jar
            };
            Ok((jar, Redirect::to("/")).into_response())
        }
    }
}
