//! Fixture data: the object graph the suites create and tear down.
//!
//! `TrafficControl` maps the fixture file (`testdata/fixtures.json` by
//! default): one array per object kind. Every kind a suite lists in its
//! `with_objs` call is drawn from here.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use to_models::{
    Asn, CacheGroup, Cdn, Coordinate, DeliveryService, Division, Parameter, PhysLocation, Profile,
    Region, Server, ServerCapability, ServerServerCapability, Status, Tenant, Type, User,
};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("cannot read fixture file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot parse fixture file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// A delivery service / server assignment, described by names so the
/// fixture file stays free of server-assigned ids.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryServiceServerAssignment {
    pub xml_id: String,
    pub server_host_names: Vec<String>,
    #[serde(default)]
    pub replace: bool,
}

/// The whole fixture data set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrafficControl {
    pub asns: Vec<Asn>,
    pub cachegroups: Vec<CacheGroup>,
    pub cdns: Vec<Cdn>,
    pub coordinates: Vec<Coordinate>,
    pub deliveryservices: Vec<DeliveryService>,
    pub delivery_service_server_assignments: Vec<DeliveryServiceServerAssignment>,
    pub divisions: Vec<Division>,
    pub parameters: Vec<Parameter>,
    #[serde(rename = "physLocations")]
    pub phys_locations: Vec<PhysLocation>,
    pub profiles: Vec<Profile>,
    pub regions: Vec<Region>,
    #[serde(rename = "serverCapabilities")]
    pub server_capabilities: Vec<ServerCapability>,
    #[serde(rename = "serverServerCapabilities")]
    pub server_server_capabilities: Vec<ServerServerCapability>,
    pub servers: Vec<Server>,
    pub statuses: Vec<Status>,
    pub tenants: Vec<Tenant>,
    pub types: Vec<Type>,
    pub users: Vec<User>,
}

/// Load the fixture file.
pub fn load_fixtures(path: impl AsRef<Path>) -> Result<TrafficControl, FixtureError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| FixtureError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Load the fixture file shipped with this crate, regardless of the
/// working directory the test runner chose.
pub fn load_default_fixtures() -> Result<TrafficControl, FixtureError> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/fixtures.json");
    load_fixtures(path)
}

/// Load the fixture file named by the configuration: the shipped file when
/// `TO_FIXTURES` is at its default, otherwise the configured path.
pub fn load_configured_fixtures(
    config: &crate::config::TestConfig,
) -> Result<TrafficControl, FixtureError> {
    if config.fixtures_path == "testdata/fixtures.json" {
        load_default_fixtures()
    } else {
        load_fixtures(&config.fixtures_path)
    }
}
