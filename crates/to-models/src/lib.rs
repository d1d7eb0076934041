//! Wire data model for the Traffic Ops control-plane API.
//!
//! Every type here mirrors a JSON document the API produces or consumes:
//! the `alerts` envelope carried by all responses, the generic
//! `{alerts, response}` wrapper, and one struct per object kind the
//! integration suites create, query, and delete.
//!
//! Conventions:
//!
//! - Field names serialize as camelCase.
//! - Fields the service may omit are `Option` and are skipped when absent,
//!   so partial update bodies never fabricate `null`s.
//! - Server-assigned fields (`id`, `lastUpdated`) are always optional on
//!   the client side.

pub mod alerts;
pub mod asn;
pub mod cachegroup;
pub mod capability;
pub mod cdn;
pub mod coordinate;
pub mod deliveryservice;
pub mod division;
pub mod phys_location;
pub mod profile;
pub mod response;
pub mod server;
pub mod status;
pub mod tenant;
pub mod types;
pub mod user;

pub use alerts::{Alert, AlertLevel, Alerts};
pub use asn::Asn;
pub use cachegroup::{CacheGroup, LocalizationMethod};
pub use capability::{ServerCapability, ServerServerCapability};
pub use cdn::Cdn;
pub use coordinate::Coordinate;
pub use deliveryservice::{DeliveryService, DeliveryServiceServer, DeliveryServiceServers};
pub use division::{Division, Region};
pub use phys_location::PhysLocation;
pub use profile::{Parameter, Profile, ProfileParameter, ProfileParameterCreationRequest};
pub use response::{ApiResponse, Ping};
pub use server::{Server, ServerInterface, ServerIpAddress};
pub use status::Status;
pub use tenant::Tenant;
pub use types::Type;
pub use user::User;
