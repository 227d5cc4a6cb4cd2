//! Shared request plumbing for the media server and plex.tv.

use std::time::Duration;

use pd_core::config::PlexConfig;
use pd_core::{Error, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::Lookup;

/// Headers Plex expects from every client.
#[derive(Debug, Clone)]
pub(crate) struct ClientHeaders {
    pub client_identifier: String,
    pub product: String,
}

impl From<&PlexConfig> for ClientHeaders {
    fn from(config: &PlexConfig) -> Self {
        Self {
            client_identifier: config.client_identifier.clone(),
            product: config.product.clone(),
        }
    }
}

/// Build an HTTP client with the given request timeout.
pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to build HTTP client with timeout: {}", e);
            Client::new()
        })
}

/// One base URL plus the token used to talk to it.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    client: Client,
    base_url: String,
    token: String,
    headers: ClientHeaders,
    service: &'static str,
}

impl Endpoint {
    pub fn new(
        client: Client,
        base_url: &str,
        token: impl Into<String>,
        headers: ClientHeaders,
        service: &'static str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            headers,
            service,
        }
    }

    /// Same base URL and client, different identity.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..self.clone()
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("Accept", "application/json")
            .header("X-Plex-Token", &self.token)
            .header("X-Plex-Client-Identifier", &self.headers.client_identifier)
            .header("X-Plex-Product", &self.headers.product)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Lookup<reqwest::Response>> {
        let resp = self
            .request(method, path)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::upstream(self.service, format!("request to {path} failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::upstream(
                self.service,
                format!("{status} from {path}: {body}"),
            ));
        }
        Ok(Lookup::Found(resp))
    }

    /// Send a request and decode the JSON body; a 404 becomes `NotFound`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Lookup<T>> {
        let Lookup::Found(resp) = self.send(method, path, query).await? else {
            return Ok(Lookup::NotFound);
        };
        resp.json::<T>()
            .await
            .map(Lookup::Found)
            .map_err(|e| Error::upstream(self.service, format!("invalid response from {path}: {e}")))
    }

    /// GET and decode a JSON body that must exist.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        match self.fetch(Method::GET, path, query).await? {
            Lookup::Found(v) => Ok(v),
            Lookup::NotFound => Err(Error::upstream(
                self.service,
                format!("404 Not Found from {path}"),
            )),
        }
    }

    /// Send a request whose response body is ignored.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Lookup<()>> {
        Ok(self.send(method, path, query).await?.map(|_| ()))
    }
}
