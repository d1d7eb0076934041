//! Profiles, Parameters, and the association between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    /// CDN id; resolved from `cdn_name` on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_name: Option<String>,
    /// Profile type string (`ATS_PROFILE`, `TR_PROFILE`, ...), distinct
    /// from the Type object kind.
    #[serde(rename = "type")]
    pub profile_type: String,
    pub routing_disabled: bool,
    /// Nested parameters, used by fixture files to describe the
    /// associations to create; listing responses omit it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Parameter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub config_file: String,
    pub value: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Body of `POST /profileparameters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileParameterCreationRequest {
    pub profile_id: i64,
    pub parameter_id: i64,
}

/// A row of `GET /profileparameters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_id: Option<i64>,
    /// Profile name, denormalized by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}
