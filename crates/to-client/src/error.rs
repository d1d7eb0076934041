//! Client error types.

use reqwest::StatusCode;
use thiserror::Error;
use to_models::Alerts;

/// Errors returned by [`crate::Session`] methods.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status. The alerts were parsed
    /// out of the body when it was an alerts document, and are empty
    /// otherwise.
    #[error("request failed with status {status}: {}", alerts.error_string())]
    Api { status: StatusCode, alerts: Alerts },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid client options: {0}")]
    InvalidOptions(String),

    #[error("login failed: {0}")]
    LoginFailed(String),
}

impl ClientError {
    /// The HTTP status of an [`ClientError::Api`] error, if that is what
    /// this is. Tests assert expected failure codes through this.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The alerts of an [`ClientError::Api`] error.
    pub fn alerts(&self) -> Option<&Alerts> {
        match self {
            ClientError::Api { alerts, .. } => Some(alerts),
            _ => None,
        }
    }
}
