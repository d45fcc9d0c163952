//! Ngram proxy service
//!
//! A stateless passthrough from the browser-facing `/ngram` endpoint to the
//! external frequency provider, with permissive CORS headers.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use config::ProxyConfig;
pub use error::{ErrorBody, ProxyError};
pub use router::create_router;
pub use server::serve;
pub use state::ProxyState;
