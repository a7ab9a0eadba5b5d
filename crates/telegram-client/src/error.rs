//! Error types for telegram-client.

use thiserror::Error;

/// Errors that can occur when talking to the Bot API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with `ok: false`.
    #[error("API error {code}: {description}")]
    Api { code: i32, description: String },

    /// The API answered `ok: true` without a result.
    #[error("missing result in response to {0}")]
    MissingResult(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether retrying the same request could succeed.
    ///
    /// 4xx answers other than rate limiting mean the request itself is wrong
    /// (bad token, blocked by the user, unknown chat).
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Http(_) => true,
            ApiError::Api { code, .. } => *code == 429 || *code >= 500,
            ApiError::Json(_) | ApiError::MissingResult(_) | ApiError::Config(_) => false,
        }
    }
}
