//! Cache groups: named sets of cache servers with a location and an
//! optional parent chain.
//!
//! Everything except the name is nullable on the wire; a cache group with
//! no coordinates is legal and the suites cover it explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How clients get localized to a cache group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalizationMethod {
    #[serde(rename = "CZ")]
    CoverageZone,
    #[serde(rename = "DEEP_CZ")]
    DeepCoverageZone,
    #[serde(rename = "GEO")]
    Geo,
}

impl fmt::Display for LocalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LocalizationMethod::CoverageZone => "CZ",
            LocalizationMethod::DeepCoverageZone => "DEEP_CZ",
            LocalizationMethod::Geo => "GEO",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_cachegroup_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_cachegroup_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_parent_cachegroup_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_parent_cachegroup_id: Option<i64>,
    /// Type name (`EDGE_LOC`, `MID_LOC`, `ORG_LOC`); `type_id` wins when
    /// both are set.
    #[serde(rename = "typeName", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(rename = "typeId", skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localization_methods: Option<Vec<LocalizationMethod>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallbacks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_to_closest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}
