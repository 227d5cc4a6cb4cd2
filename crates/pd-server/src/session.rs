//! Signed-cookie sessions.
//!
//! The session is serialized to JSON, base64url-encoded, and followed by a
//! `.` and the hex HMAC-SHA256 of the encoded payload. Anything that fails
//! to verify or parse reads back as an empty [`Session`].

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use pd_core::config::SessionConfig;
use pd_core::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Per-browser session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Session {
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }
}

/// Generate a random 32-byte secret, hex-encoded.
pub fn generate_secret() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    hex::encode(bytes)
}

/// Signs, verifies and carries [`Session`]s in a cookie jar.
#[derive(Clone)]
pub struct SessionCodec {
    mac: HmacSha256,
    cookie_name: String,
    secure: bool,
    max_age: Option<time::Duration>,
}

impl SessionCodec {
    pub fn new(secret: &str, config: &SessionConfig) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| Error::Internal(format!("Invalid session secret: {e}")))?;
        let max_age = config
            .max_age_hours
            .and_then(|h| i64::try_from(h).ok())
            .map(time::Duration::hours);

        Ok(Self {
            mac,
            cookie_name: config.cookie_name.clone(),
            secure: config.secure,
            max_age,
        })
    }

    /// Build from config. An empty secret is replaced by a random one, which
    /// invalidates existing cookies on every restart.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        if config.secret.is_empty() {
            tracing::warn!(
                "No session secret configured; using a random secret for this process"
            );
            return Self::new(&generate_secret(), config);
        }
        Self::new(&config.secret, config)
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    fn signature(&self, payload: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac
    }

    pub fn encode(&self, session: &Session) -> String {
        let json = serde_json::to_vec(session).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(json);
        let sig = hex::encode(self.signature(&payload).finalize().into_bytes());
        format!("{payload}.{sig}")
    }

    pub fn decode(&self, value: &str) -> Session {
        self.verify(value).unwrap_or_default()
    }

    fn verify(&self, value: &str) -> Option<Session> {
        let (payload, sig) = value.rsplit_once('.')?;
        let sig = hex::decode(sig).ok()?;
        self.signature(payload).verify_slice(&sig).ok()?;
        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Read the session carried by `jar`, or an empty one.
    pub fn read(&self, jar: &CookieJar) -> Session {
        jar.get(&self.cookie_name)
            .map(|c| self.decode(c.value()))
            .unwrap_or_default()
    }

    pub fn write(&self, jar: CookieJar, session: &Session) -> CookieJar {
        let mut cookie = Cookie::build((self.cookie_name.clone(), self.encode(session)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        if let Some(max_age) = self.max_age {
            cookie = cookie.max_age(max_age);
        }
        jar.add(cookie)
    }

    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build((self.cookie_name.clone(), "")).path("/"))
    }
}
