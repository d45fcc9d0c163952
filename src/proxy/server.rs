//! Proxy server entry point.

use anyhow::{Context, Result};
use tracing::info;

use super::config::ProxyConfig;
use super::router::create_router;
use super::state::ProxyState;

/// Bind and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound, or
/// the server fails while running.
pub async fn serve(config: ProxyConfig) -> Result<()> {
    let addr = config
        .socket_addr()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;
    let state = ProxyState::from_config(&config).context("failed to build HTTP client")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Listening on http://{}", addr);
    info!("Forwarding /ngram to {}", config.upstream);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("proxy server failed")?;

    info!("Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
