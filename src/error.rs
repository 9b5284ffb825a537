//! Application error types and retryability classification.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Maximum number of raw-body characters attached to a deserialization error.
const EXCERPT_LEN: usize = 160;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Invalid response shape at `{path}`: {detail} (body: {excerpt})")]
    Deserialization {
        path: String,
        detail: String,
        excerpt: String,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl AppError {
    /// Build a deserialization error pointing at the violated field,
    /// keeping a truncated excerpt of the raw payload for diagnostics.
    pub fn deserialization(path: &str, detail: impl Into<String>, body: &str) -> Self {
        let excerpt: String = body.chars().take(EXCERPT_LEN).collect();
        Self::Deserialization {
            path: path.to_string(),
            detail: detail.into(),
            excerpt,
        }
    }

    /// Whether a retry with backoff can reasonably succeed.
    ///
    /// Transport failures and timeouts, 5xx and 429 qualify; other 4xx and
    /// shape-validation failures are terminal and surface immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Transport(_) => true,
            AppError::UpstreamStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamStatus { .. } | AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Deserialization { .. } => StatusCode::BAD_GATEWAY,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
