//! Error types for the business layer.
//!
//! Every failure a resource page can hit ends up as an [`ApiError`]. Commands turn
//! it into a message on their compute; nothing here is retried automatically.

use thiserror::Error;

use crate::form::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Envelope(String),

    #[error("missing path parameter `{0}`")]
    MissingPathParam(String),

    #[error("record has no id")]
    MissingRecordId,

    #[error("unknown resource `{0}`")]
    UnknownResource(String),

    #[error("resource `{0}` is read-only")]
    ReadOnly(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl From<crate::http::HttpError> for ApiError {
    fn from(err: crate::http::HttpError) -> Self {
        Self::Http(err.message)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(#[from] serde_env::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
