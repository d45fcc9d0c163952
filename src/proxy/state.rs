//! Application state for the proxy server.

use super::config::ProxyConfig;
use std::sync::Arc;

/// Shared state passed to all handlers.
#[derive(Debug, Clone)]
pub struct ProxyState {
    /// Client reused for every upstream call
    pub client: reqwest::Client,
    /// Provider endpoint, e.g. `https://books.google.com/ngrams/json`
    pub upstream: Arc<str>,
}

impl ProxyState {
    pub fn new(client: reqwest::Client, upstream: impl Into<String>) -> Self {
        Self {
            client,
            upstream: Arc::from(upstream.into()),
        }
    }

    /// Build the state, including an HTTP client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::new(client, config.upstream.clone()))
    }
}
