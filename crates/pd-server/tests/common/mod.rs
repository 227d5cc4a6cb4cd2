//! Shared test harness for router tests.
//!
//! [`TestHarness`] wires a full [`AppContext`] around the in-memory fake
//! media server and drives the router with `oneshot` requests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pd_core::config::Config;
use pd_server::context::AppContext;
use pd_server::handle::ServerHandle;
use pd_server::router::build_router;
use pd_test_support::{fixtures, FakeLibrary, FakeServer};
use serde_json::Value;
use tower::ServiceExt;

pub const PLEX_URL: &str = "http://nas:32400";
pub const ADMIN_TOKEN: &str = "admintok";

/// Config pointing at nothing real; the probe hits a closed port so pages
/// report offline without waiting.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.plex.url = PLEX_URL.into();
    config.plex.token = ADMIN_TOKEN.into();
    config.session.secret = "test-secret-that-is-long-enough-for-hmac".into();
    config.connectivity.url = "http://127.0.0.1:9/success.txt".into();
    config.connectivity.timeout_secs = 1;
    config
}

pub struct TestHarness {
    pub ctx: AppContext,
    pub server: Option<Arc<FakeServer>>,
    router: Router,
}

impl TestHarness {
    /// Household fixture server.
    pub fn new() -> Self {
        Self::with_server(fixtures::household())
    }

    pub fn with_server(server: FakeServer) -> Self {
        let server = Arc::new(server);
        let handle = ServerHandle::connected(server.clone());
        Self::build(handle, Some(server))
    }

    /// The startup connection failed.
    pub fn disconnected() -> Self {
        Self::build(ServerHandle::disconnected(), None)
    }

    fn build(handle: ServerHandle, server: Option<Arc<FakeServer>>) -> Self {
        let ctx = AppContext::new(test_config(), handle).expect("failed to build context");
        let router = build_router(ctx.clone(), None);
        Self {
            ctx,
            server,
            router,
        }
    }

    pub fn library(&self) -> &FakeLibrary {
        self.server
            .as_ref()
            .expect("harness has no server")
            .library()
    }

    /// GET `uri`, optionally carrying a `Cookie` header.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut req = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Log in as `username` and return the session cookie pair.
    pub async fn login(&self, username: &str) -> String {
        let resp = self.get(&format!("/login/{username}"), None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        session_cookie(&resp).expect("login did not set a cookie")
    }
}

/// The `name=value` part of the response's Set-Cookie header.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.trim().to_string())
}

pub fn set_cookie_header(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

pub fn location(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}
