//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! sub-configs for the HTTP server, the Plex connection, the session cookie
//! and the connectivity probe. Every section defaults sensibly so a
//! completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub plex: PlexConfig,
    pub session: SessionConfig,
    pub connectivity: ConnectivityConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if !is_http_url(&self.plex.url) {
            warnings.push(format!("plex.url '{}' is not an http(s) URL", self.plex.url));
        }
        if self.plex.token.is_empty() {
            warnings.push("plex.token is empty; the server connection will fail".into());
        }
        if !is_http_url(&self.plex.myplex_url) {
            warnings.push(format!(
                "plex.myplex_url '{}' is not an http(s) URL",
                self.plex.myplex_url
            ));
        }

        if self.session.secret.is_empty() {
            warnings.push(
                "session.secret is empty; a random secret will be used and sessions will not survive restarts"
                    .into(),
            );
        } else if self.session.secret.len() < MIN_SECRET_LEN {
            warnings.push(format!(
                "session.secret is shorter than {MIN_SECRET_LEN} characters"
            ));
        }

        if !is_http_url(&self.connectivity.url) {
            warnings.push(format!(
                "connectivity.url '{}' is not an http(s) URL",
                self.connectivity.url
            ));
        }

        warnings
    }
}

/// Recommended minimum length for the session signing secret.
pub const MIN_SECRET_LEN: usize = 32;

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Optional directory of UI assets served under `/static`.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            static_dir: None,
        }
    }
}

/// Connection settings for the Plex Media Server and plex.tv.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlexConfig {
    /// Base URL of the media server, e.g. `http://192.168.1.10:32400`.
    pub url: String,
    /// Admin access token.
    pub token: String,
    #[serde(default = "default_plex_timeout")]
    pub timeout_secs: u64,
    /// Base URL of the account service used to list shared users.
    #[serde(default = "default_myplex_url")]
    pub myplex_url: String,
    /// Sent as `X-Plex-Client-Identifier`.
    #[serde(default = "default_client_identifier")]
    pub client_identifier: String,
    /// Sent as `X-Plex-Product`.
    #[serde(default = "default_product")]
    pub product: String,
}

fn default_plex_timeout() -> u64 {
    10
}
fn default_myplex_url() -> String {
    "https://plex.tv".into()
}
fn default_client_identifier() -> String {
    "plexdeck".into()
}
fn default_product() -> String {
    "Plexdeck".into()
}

impl Default for PlexConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:32400".into(),
            token: String::new(),
            timeout_secs: default_plex_timeout(),
            myplex_url: default_myplex_url(),
            client_identifier: default_client_identifier(),
            product: default_product(),
        }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// HMAC key for signing the session cookie.
    pub secret: String,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Set the `Secure` attribute (only when served over HTTPS).
    pub secure: bool,
    /// Cookie lifetime; `None` keeps a browser-session cookie.
    pub max_age_hours: Option<u64>,
}

fn default_cookie_name() -> String {
    "plexdeck_session".into()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            cookie_name: default_cookie_name(),
            secure: false,
            max_age_hours: None,
        }
    }
}

/// Internet reachability probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    pub url: String,
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

fn default_probe_timeout() -> u64 {
    3
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            url: "http://detectportal.firefox.com/success.txt".into(),
            timeout_secs: default_probe_timeout(),
        }
    }
}
