//! Typed async client for the Traffic Ops control-plane API.
//!
//! The entry point is [`Session`]: log in once, then call the per-kind
//! CRUD methods. Authentication is a session cookie issued by
//! `POST /api/5.0/user/login` and carried by the client's cookie store on
//! every subsequent request.
//!
//! ```rust,ignore
//! use to_client::{ClientOpts, RequestOptions, Session};
//!
//! let session = Session::login(
//!     "https://trafficops.example.net",
//!     "admin",
//!     "twelve12",
//!     ClientOpts::new("my-tool/1.0"),
//! )
//! .await?;
//!
//! let opts = RequestOptions::new().with_param("name", "cdn1");
//! let cdns = session.get_cdns(&opts).await?;
//! assert_eq!(cdns.response.len(), 1);
//! ```
//!
//! Every method returns an [`ApiResult`]: the HTTP status, the alerts the
//! service attached, and the typed payload. A `304 Not Modified` is a
//! success with an empty payload; any other non-2xx status is a
//! [`ClientError::Api`] carrying the parsed alerts.

pub mod endpoints;
pub mod error;
pub mod options;
pub mod response;
pub mod session;

// Callers build header names and inspect status codes with reqwest types;
// re-export the crate so they need not track its version themselves.
pub use reqwest;

pub use error::ClientError;
pub use options::{ClientOpts, RequestOptions};
pub use response::ApiResult;
pub use session::{Session, API_VERSION};
