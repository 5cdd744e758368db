//! Related record reference
//!
//! Relationship attributes arrive either expanded (`{"$id": .., "name": ..}`
//! when the query selected `relation.*`) or as a bare id string.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::util::string_from_value;

/// Reference to a related row (restaurant, delivery agent)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedRecord {
    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RelatedRecord {
    pub fn from_value(value: &Value) -> Option<Self> {
        let record = match value {
            Value::Object(map) => Self {
                id: map.get("$id").and_then(string_from_value),
                name: map.get("name").and_then(string_from_value),
            },
            Value::String(id) if !id.is_empty() => Self {
                id: Some(id.clone()),
                name: None,
            },
            _ => return None,
        };
        if record.id.is_none() && record.name.is_none() {
            return None;
        }
        Some(record)
    }

    /// Name for display, `N/A` when the relation was not expanded
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("N/A")
    }
}

/// Serde adapter for relationship attributes
pub fn lenient_relation<'de, D>(deserializer: D) -> Result<Option<RelatedRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(RelatedRecord::from_value(&value))
}
