//! Turns server-relative asset paths into authenticated URLs.

use pd_core::config::PlexConfig;

/// Appends the server base URL and access token to asset paths.
#[derive(Debug, Clone)]
pub struct UrlSigner {
    base_url: String,
    token: String,
}

impl UrlSigner {
    pub fn new(base_url: &str, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &PlexConfig) -> Self {
        Self::new(&config.url, config.token.clone())
    }

    /// `<base-url><path>?X-Plex-Token=<token>`; absent or empty paths stay
    /// absent.
    pub fn sign(&self, path: Option<&str>) -> Option<String> {
        let path = path.filter(|p| !p.is_empty())?;
        Some(format!("{}{}?X-Plex-Token={}", self.base_url, path, self.token))
    }
}
