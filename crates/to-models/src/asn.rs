//! Autonomous System Numbers, each attached to a cache group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub asn: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cachegroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cachegroup_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}
