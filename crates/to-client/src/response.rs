//! The result type every endpoint method returns.

use reqwest::StatusCode;
use to_models::Alert;

/// A successful API exchange: the HTTP status, the alerts the service
/// attached, and the typed payload.
///
/// On `304 Not Modified` the payload is `T::default()` — the service sends
/// no body, and callers that passed `If-Modified-Since` assert on
/// `status` rather than the payload.
#[derive(Debug, Clone)]
pub struct ApiResult<T> {
    pub status: StatusCode,
    pub alerts: Vec<Alert>,
    pub response: T,
}

impl<T> ApiResult<T> {
    /// Whether the exchange was a `304 Not Modified`.
    pub fn not_modified(&self) -> bool {
        self.status == StatusCode::NOT_MODIFIED
    }
}
