//! Generic `{alerts, response}` envelope for listing endpoints.

use crate::alerts::Alert;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The body shape of every payload-carrying API response.
///
/// `response` defaults when the body omits it, which is how a
/// `304 Not Modified` or a bare alerts document deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned + Default"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub response: T,
}

/// Body of `GET /ping`, the unauthenticated liveness probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ping {
    pub ping: String,
}

impl<T: Default> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            alerts: Vec::new(),
            response: T::default(),
        }
    }
}
