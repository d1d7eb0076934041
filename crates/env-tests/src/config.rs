//! Suite configuration from environment variables.

use std::collections::HashMap;

/// Where and how to reach the deployment under test.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Base URL of the Traffic Ops deployment.
    pub url: String,
    /// Admin account username.
    pub username: String,
    /// Admin account password.
    pub password: String,
    /// Accept the self-signed certificates test deployments run with.
    pub insecure: bool,
    /// Path to the fixture data file.
    pub fixtures_path: String,
}

impl TestConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Resolve configuration from an explicit variable map, with defaults
    /// for anything unset.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let get = |key: &str, default: &str| {
            vars.get(key)
                .map(String::as_str)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        Self {
            url: get("TO_URL", "https://localhost:6443"),
            username: get("TO_USER", "admin"),
            password: get("TO_PASSWORD", "twelve12"),
            insecure: get("TO_INSECURE", "true") == "true",
            fixtures_path: get("TO_FIXTURES", "testdata/fixtures.json"),
        }
    }
}
