//! Frequency data providers
//!
//! `TrendSource` is the narrow seam between the trend fetcher and the network.
//! `ProxyTrendSource` talks to the local `/ngram` proxy.

use super::key::WordKey;
use super::series::{NgramSeries, TrendPoint, YearRange, reshape};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Where the proxy listens unless told otherwise
pub const DEFAULT_PROXY_URL: &str = "http://localhost:8000";

const CORPUS: &str = "26";
const SMOOTHING: &str = "1";
const CASE_INSENSITIVE: &str = "true";

/// Error type for trend retrieval
#[derive(Debug, Error)]
pub enum TrendError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Anything that can answer "how often was each of these words used per year"
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Fetch one series per word for the given years
    ///
    /// # Errors
    ///
    /// Returns `TrendError` when the provider cannot be reached or answers
    /// with a non-success status.
    async fn fetch(&self, key: &WordKey, range: YearRange) -> Result<Vec<NgramSeries>, TrendError>;
}

/// Fetch and reshape in one step
///
/// # Errors
///
/// Propagates the source's `TrendError`.
pub async fn fetch_trend_points(
    source: &dyn TrendSource,
    key: &WordKey,
    range: YearRange,
) -> Result<Vec<TrendPoint>, TrendError> {
    let payload = source.fetch(key, range).await?;
    Ok(reshape(key, &payload, range))
}

/// Trend source backed by the local ngram proxy
#[derive(Debug, Clone)]
pub struct ProxyTrendSource {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyTrendSource {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TrendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/ngram", self.base_url)
    }
}

#[async_trait]
impl TrendSource for ProxyTrendSource {
    async fn fetch(&self, key: &WordKey, range: YearRange) -> Result<Vec<NgramSeries>, TrendError> {
        let year_start = range.start.to_string();
        let year_end = range.end.to_string();
        debug!(key = %key, "requesting trend data");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("content", key.as_str()),
                ("year_start", year_start.as_str()),
                ("year_end", year_end.as_str()),
                ("corpus", CORPUS),
                ("smoothing", SMOOTHING),
                ("case_insensitive", CASE_INSENSITIVE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrendError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}
