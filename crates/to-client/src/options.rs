//! Client construction options and per-request options.

use reqwest::header::HeaderMap;
use std::time::Duration;

/// Default HTTP timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for creating a [`crate::Session`].
#[derive(Debug, Clone)]
pub struct ClientOpts {
    /// HTTP User-Agent, required and non-empty.
    pub user_agent: String,

    /// Per-request timeout. Defaults to [`DEFAULT_TIMEOUT`].
    pub request_timeout: Duration,

    /// Ignore TLS certificate errors. Test deployments run with
    /// self-signed certificates; production use is strongly discouraged.
    pub insecure: bool,
}

impl ClientOpts {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            request_timeout: DEFAULT_TIMEOUT,
            insecure: false,
        }
    }

    #[must_use]
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Options applied to a single request: query parameters and extra
/// headers (e.g. `If-Modified-Since`). The default is empty, and every
/// endpoint method takes a reference to one of these.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query_parameters: Vec<(String, String)>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one query parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query_parameters.push((key.into(), value.to_string()));
        self
    }

    /// Add one header. Invalid header values are silently dropped; the
    /// values tests pass (HTTP dates) are always valid.
    #[must_use]
    pub fn with_header(mut self, name: reqwest::header::HeaderName, value: &str) -> Self {
        if let Ok(v) = reqwest::header::HeaderValue::from_str(value) {
            self.headers.insert(name, v);
        }
        self
    }
}
