//! Session management and the request plumbing shared by every endpoint
//! method.

use crate::error::ClientError;
use crate::options::{ClientOpts, RequestOptions};
use crate::response::ApiResult;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use to_models::{Alerts, ApiResponse, Ping};

/// The API version every request path is pinned to.
pub const API_VERSION: &str = "5.0";

/// Alert text the service attaches to a successful login.
const LOGIN_SUCCESS_TEXT: &str = "Successfully logged in.";

/// Alert text the service attaches to a successful logout.
const LOGOUT_SUCCESS_TEXT: &str = "You are logged out.";

/// An authenticated (or deliberately unauthenticated) connection to the
/// control plane.
///
/// The session cookie issued at login lives in the underlying client's
/// cookie store, so a `Session` can be shared and called concurrently.
#[derive(Debug)]
pub struct Session {
    base_url: String,
    username: String,
    http: reqwest::Client,
}

impl Session {
    /// Log in and return an authenticated session.
    ///
    /// Login is only considered successful when the response carries a
    /// `success`-level alert with the service's login text; a 200 with
    /// anything else is a [`ClientError::LoginFailed`].
    pub async fn login(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        opts: ClientOpts,
    ) -> Result<Self, ClientError> {
        let session = Self::unauthenticated(url, opts)?;
        let username = username.into();
        let password = password.into();

        let login_url = session.api_url("/user/login");
        tracing::debug!(target: "to_client.session", url = %login_url, user = %username, "logging in");

        let response = session
            .http
            .post(&login_url)
            .json(&json!({ "u": username, "p": password }))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let alerts: Alerts = serde_json::from_slice(&body).unwrap_or_default();

        if !status.is_success() {
            return Err(ClientError::LoginFailed(format!(
                "status {}: {}",
                status,
                alerts.error_string()
            )));
        }

        let success = alerts
            .alerts
            .iter()
            .any(|a| a.level == to_models::AlertLevel::Success && a.text == LOGIN_SUCCESS_TEXT);
        if !success {
            return Err(ClientError::LoginFailed(format!(
                "no login success alert in response: {:?}",
                alerts
            )));
        }

        Ok(Self { username, ..session })
    }

    /// Build a session without logging in, for exercising the API's
    /// behavior toward unauthenticated callers.
    pub fn unauthenticated(
        url: impl Into<String>,
        opts: ClientOpts,
    ) -> Result<Self, ClientError> {
        if opts.user_agent.trim().is_empty() {
            return Err(ClientError::InvalidOptions(
                "user_agent is required".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(&opts.user_agent)
            .timeout(opts.request_timeout)
            .danger_accept_invalid_certs(opts.insecure)
            .build()?;

        Ok(Self {
            base_url: url.into().trim_end_matches('/').to_string(),
            username: String::new(),
            http,
        })
    }

    /// End the session server-side. The cookie store keeps the (now
    /// invalid) cookie; subsequent requests are rejected with 401.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result: ApiResult<Option<serde_json::Value>> =
            self.request(Method::POST, "/user/logout", None::<&()>, &RequestOptions::default())
                .await?;

        let success = result
            .alerts
            .iter()
            .any(|a| a.level == to_models::AlertLevel::Success && a.text == LOGOUT_SUCCESS_TEXT);
        if !success {
            return Err(ClientError::LoginFailed(format!(
                "no logout success alert in response: {:?}",
                result.alerts
            )));
        }
        Ok(())
    }

    /// Unauthenticated liveness probe.
    pub async fn ping(&self) -> Result<Ping, ClientError> {
        let url = self.api_url("/ping");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let alerts: Alerts = serde_json::from_slice(&body).unwrap_or_default();
            return Err(ClientError::Api { status, alerts });
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// The username this session logged in as (empty for unauthenticated
    /// sessions).
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The base URL this session talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path: `{base}/api/{version}{path}`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}{}", self.base_url, API_VERSION, path)
    }

    // ------------------------------------------------------------------
    // Request plumbing used by the endpoint modules.
    // ------------------------------------------------------------------

    pub(crate) async fn api_get<T>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<ApiResult<T>, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        self.request(Method::GET, path, None::<&()>, opts).await
    }

    pub(crate) async fn api_post<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<ApiResult<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.request(Method::POST, path, Some(body), opts).await
    }

    pub(crate) async fn api_put<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: &RequestOptions,
    ) -> Result<ApiResult<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        self.request(Method::PUT, path, Some(body), opts).await
    }

    pub(crate) async fn api_delete<T>(
        &self,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<ApiResult<T>, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        self.request(Method::DELETE, path, None::<&()>, opts).await
    }

    /// Send one API request and interpret the response:
    ///
    /// - `304 Not Modified` → success with a default payload;
    /// - other 2xx → parse the `{alerts, response}` envelope;
    /// - anything else → [`ClientError::Api`] with whatever alerts the
    ///   body held.
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        opts: &RequestOptions,
    ) -> Result<ApiResult<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let url = self.api_url(path);
        tracing::debug!(
            target: "to_client.session",
            method = %method,
            url = %url,
            params = ?opts.query_parameters,
            "sending API request"
        );

        let mut request = self
            .http
            .request(method, &url)
            .headers(opts.headers.clone());
        if !opts.query_parameters.is_empty() {
            request = request.query(&opts.query_parameters);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            return Ok(ApiResult {
                status,
                alerts: Vec::new(),
                response: T::default(),
            });
        }

        let bytes = response.bytes().await?;

        if !status.is_success() {
            let alerts: Alerts = serde_json::from_slice(&bytes).unwrap_or_default();
            return Err(ClientError::Api { status, alerts });
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)?;
        Ok(ApiResult {
            status,
            alerts: envelope.alerts,
            response: envelope.response,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_pins_version() {
        let session =
            Session::unauthenticated("https://localhost:6443/", ClientOpts::new("test/1.0"))
                .unwrap();
        assert_eq!(
            session.api_url("/cdns"),
            "https://localhost:6443/api/5.0/cdns"
        );
    }

    #[test]
    fn test_unauthenticated_requires_user_agent() {
        let err = Session::unauthenticated("http://localhost", ClientOpts::new("  "))
            .err()
            .expect("blank user agent must be rejected");
        assert!(matches!(err, ClientError::InvalidOptions(_)));
    }
}
