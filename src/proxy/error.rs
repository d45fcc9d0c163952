//! Proxy error handling and response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error type for proxy handlers.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Required `content` query parameter absent or blank
    #[error("Missing ?content=word1,word2")]
    MissingContent,
    /// Query string could not be decoded
    #[error("{0}")]
    BadQuery(String),
    /// Provider answered with a non-success status; relayed as-is
    #[error("Failed with {}", .0.as_u16())]
    Upstream(StatusCode),
    /// Provider unreachable or its body unreadable
    #[error("{0}")]
    Transport(String),
}

impl ProxyError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingContent | Self::BadQuery(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(status) => *status,
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if message.is_empty() {
            Self::Transport("Unknown error".to_string())
        } else {
            Self::Transport(message)
        }
    }
}
