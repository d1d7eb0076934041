//! Types describe the kind of other objects (`useInTable` names the table
//! the type applies to, e.g. `server`, `cachegroup`, `deliveryservice`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub use_in_table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_names() {
        let t = Type {
            name: "EDGE_LOC".into(),
            description: "Edge Logical Location".into(),
            use_in_table: "cachegroup".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"useInTable\":\"cachegroup\""));
        // Server-assigned fields stay absent until the service fills them.
        assert!(!json.contains("lastUpdated"));
        assert!(!json.contains("\"id\""));
    }
}
