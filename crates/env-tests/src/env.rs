//! Deployment connection utilities.
//!
//! This module provides the `TestEnv` type for validating that the Traffic
//! Ops deployment under test is reachable before running suites, and for
//! holding the authenticated admin session they share.

use crate::config::TestConfig;
use std::net::TcpStream;
use std::time::Duration;
use thiserror::Error;
use to_client::{ClientError, ClientOpts, Session};

/// User agent every suite request carries.
pub const USER_AGENT: &str = "to-api-tests/0.1";

/// Deployment connection errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Traffic Ops not detected at {host}:{port}. Set TO_URL to a running deployment")]
    NotReachable { host: String, port: u16 },

    #[error("cannot interpret TO_URL '{0}' as scheme://host[:port]")]
    InvalidUrl(String),

    #[error("admin login failed: {0}")]
    Login(#[from] ClientError),
}

/// Connection to the deployment under test: configuration plus the
/// authenticated admin session.
pub struct TestEnv {
    pub config: TestConfig,
    pub session: Session,
}

impl TestEnv {
    /// Connect using configuration from the environment.
    ///
    /// Performs a TCP reachability check with a 5s timeout before logging
    /// in, so an absent deployment fails with an actionable message
    /// instead of a per-test timeout.
    pub async fn connect() -> Result<Self, EnvError> {
        Self::connect_with(TestConfig::from_env()).await
    }

    /// Connect using explicit configuration.
    pub async fn connect_with(config: TestConfig) -> Result<Self, EnvError> {
        let (host, port) = host_port(&config.url)?;
        check_tcp(&host, port)?;

        let opts = ClientOpts::new(USER_AGENT).insecure(config.insecure);
        let session = Session::login(&config.url, &config.username, &config.password, opts).await?;

        Ok(Self { config, session })
    }

    /// A session that never logged in, for asserting the API's behavior
    /// toward unauthenticated callers.
    pub fn no_auth_session(&self) -> Result<Session, ClientError> {
        let opts = ClientOpts::new(USER_AGENT).insecure(self.config.insecure);
        Session::unauthenticated(&self.config.url, opts)
    }
}

/// Split a base URL into host and port, defaulting the port from the
/// scheme.
fn host_port(url: &str) -> Result<(String, u16), EnvError> {
    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| EnvError::InvalidUrl(url.to_string()))?;
    let host_port = rest.trim_end_matches('/');
    let default_port = if scheme == "https" { 443 } else { 80 };

    match host_port.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse()
                .map_err(|_| EnvError::InvalidUrl(url.to_string()))?;
            Ok((host.to_string(), port))
        }
        None => Ok((host_port.to_string(), default_port)),
    }
}

/// Check that a TCP endpoint accepts connections, with a 5 second timeout.
fn check_tcp(host: &str, port: u16) -> Result<(), EnvError> {
    let addrs: Vec<_> = std::net::ToSocketAddrs::to_socket_addrs(&(host, port))
        .map_err(|_| EnvError::NotReachable {
            host: host.to_string(),
            port,
        })?
        .collect();

    for addr in addrs {
        if TcpStream::connect_timeout(&addr, Duration::from_secs(5)).is_ok() {
            return Ok(());
        }
    }
    Err(EnvError::NotReachable {
        host: host.to_string(),
        port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_port_with_explicit_port() {
        let (host, port) = host_port("https://localhost:6443").unwrap();
        assert_eq!(host, "localhost");
        assert_eq!(port, 6443);
    }

    #[test]
    fn test_host_port_defaults_from_scheme() {
        assert_eq!(host_port("https://to.example.net").unwrap().1, 443);
        assert_eq!(host_port("http://to.example.net/").unwrap().1, 80);
    }

    #[test]
    fn test_host_port_rejects_schemeless_url() {
        assert!(host_port("localhost:6443").is_err());
    }
}
