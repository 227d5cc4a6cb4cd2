//! Internet reachability check used to flag pages as online or offline.

use std::time::Duration;

use pd_core::config::ConnectivityConfig;
use reqwest::Client;

/// Short-timeout GET against a well-known endpoint.
#[derive(Debug, Clone)]
pub struct ConnectivityProbe {
    client: Client,
    url: String,
}

impl ConnectivityProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &ConnectivityConfig) -> Self {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// Any HTTP answer counts as online. Transport failures of any kind,
    /// timeouts included, count as offline.
    pub async fn is_online(&self) -> bool {
        match self.client.get(&self.url).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Connectivity check against {} failed: {}", self.url, e);
                false
            }
        }
    }
}
