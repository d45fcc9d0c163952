//! Router configuration for the proxy.
//!
//! Sets up the routes plus CORS and tracing middleware.

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::ProxyState;

/// Create the proxy router with all routes and middleware.
pub fn create_router(state: ProxyState) -> Router {
    // The front end is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ngram", get(handlers::get_ngram))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
