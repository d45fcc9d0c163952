//! HTTP handlers for the proxy.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::dto::{HealthResponse, NgramQuery};
use super::error::ProxyError;
use super::state::ProxyState;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /ngram
///
/// Forwards the query to the frequency provider and relays its JSON body and
/// status code. Repeated parameters are comma-joined.
pub async fn get_ngram(
    State(state): State<ProxyState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<(StatusCode, Json<Value>), ProxyError> {
    let Query(pairs) = query.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "undecodable ngram query");
        ProxyError::BadQuery(rejection.body_text())
    })?;
    let params = pairs.into_iter().collect::<NgramQuery>().resolve()?;
    debug!(content = %params.content, "forwarding ngram query");

    let response = state
        .client
        .get(&*state.upstream)
        .query(&params.pairs())
        .send()
        .await
        .map_err(|err| {
            error!(error = %err, "ngram upstream unreachable");
            ProxyError::from(err)
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!(%status, content = %params.content, "ngram upstream returned an error");
        return Err(ProxyError::Upstream(status));
    }

    let body: Value = response.json().await.map_err(|err| {
        error!(error = %err, "ngram upstream body unreadable");
        ProxyError::from(err)
    })?;

    Ok((status, Json(body)))
}
