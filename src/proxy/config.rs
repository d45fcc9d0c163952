//! Proxy configuration
//!
//! Every option has a CLI flag and, where it makes sense, an environment
//! variable fallback.

use clap::Args;
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_UPSTREAM_URL: &str = "https://books.google.com/ngrams/json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Settings for the `serve` command
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ProxyConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Frequency provider endpoint queries are forwarded to
    #[arg(long, env = "NGRAM_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream: String,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl ProxyConfig {
    /// # Errors
    ///
    /// Returns an error if `host:port` is not a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            upstream: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
