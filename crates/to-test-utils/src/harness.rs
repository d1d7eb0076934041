//! Test server harness.
//!
//! Spawns the mock control plane on a random loopback port for hermetic
//! integration tests.

use crate::api::{build_router, AppState};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// Username the default harness accepts.
pub const DEFAULT_USERNAME: &str = "admin";

/// Password the default harness accepts.
pub const DEFAULT_PASSWORD: &str = "twelve12";

/// A running mock control plane.
///
/// # Example
/// ```rust,ignore
/// let server = TestToServer::spawn().await?;
/// let session = Session::login(server.url(), "admin", "twelve12", opts).await?;
/// ```
pub struct TestToServer {
    addr: SocketAddr,
    state: AppState,
    _handle: JoinHandle<()>,
}

impl TestToServer {
    /// Spawn with the default admin credentials.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with(DEFAULT_USERNAME, DEFAULT_PASSWORD).await
    }

    /// Spawn with specific admin credentials.
    ///
    /// The server binds `127.0.0.1:0` and serves in a background task
    /// until the harness is dropped.
    pub async fn spawn_with(username: &str, password: &str) -> Result<Self, anyhow::Error> {
        let state = AppState::new(username, password);
        let app = build_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("failed to bind mock server: {e}"))?;
        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("failed to read local address: {e}"))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("mock control plane error: {e}");
            }
        });

        tracing::debug!(target: "to_test_utils.harness", %addr, "mock control plane listening");
        Ok(Self {
            addr,
            state,
            _handle: handle,
        })
    }

    /// Base URL of the running server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The socket address the server bound.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Direct access to the shared state, for tests that want to inspect
    /// or pre-seed the store without going through the API.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl Drop for TestToServer {
    fn drop(&mut self) {
        // Stop the background server as soon as the test is done with it.
        self._handle.abort();
    }
}
