//! Delivery services and their server assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_name: Option<String>,
    #[serde(rename = "typeId", skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ds_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_provider: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_routing_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miss_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miss_long: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_site_origin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_server_fqdn: Option<String>,
    /// 0 = HTTP, 1 = HTTPS, 2 = HTTP and HTTPS, 3 = HTTP to HTTPS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qstring_ignore: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_request_handling: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional_geo_blocking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// A row of `GET /deliveryserviceserver`: one delivery service id paired
/// with one assigned server id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryServiceServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_service: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Body of `POST /deliveryserviceserver`: assign servers to a delivery
/// service, optionally replacing existing assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryServiceServers {
    pub ds_id: i64,
    pub servers: Vec<i64>,
    pub replace: bool,
}
