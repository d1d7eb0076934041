//! In-process mock Traffic Ops control plane.
//!
//! Reproduces the observable HTTP surface the integration suites assert on
//! — session-cookie auth, the alerts envelope, query-parameter filtering,
//! `If-Modified-Since` handling, pagination validation, and
//! referential-integrity delete guards — over an in-memory store. No
//! persistence, no real password hashing, none of the service's
//! CDN-configuration logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use to_test_utils::TestToServer;
//!
//! let server = TestToServer::spawn().await?;
//! let session = Session::login(server.url(), "admin", "twelve12", opts).await?;
//! ```

pub mod api;
pub mod harness;
pub mod store;

mod logging;

pub use harness::{TestToServer, DEFAULT_PASSWORD, DEFAULT_USERNAME};
pub use logging::init_test_tracing;
