//! Query builder
//!
//! Each query is sent as one `queries[]` parameter holding its JSON form,
//! e.g. `{"method":"equal","attribute":"orderStatus","values":["delivered"]}`.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Vec<Value>>,
}

impl Query {
    fn new(method: &'static str, attribute: Option<&str>, values: Option<Vec<Value>>) -> Self {
        Self {
            method,
            attribute: attribute.map(str::to_string),
            values,
        }
    }

    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::new("equal", Some(attribute), Some(vec![value.into()]))
    }

    pub fn greater_than_equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::new("greaterThanEqual", Some(attribute), Some(vec![value.into()]))
    }

    pub fn less_than_equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self::new("lessThanEqual", Some(attribute), Some(vec![value.into()]))
    }

    pub fn contains(attribute: &str, value: impl Into<Value>) -> Self {
        Self::new("contains", Some(attribute), Some(vec![value.into()]))
    }

    pub fn order_desc(attribute: &str) -> Self {
        Self::new("orderDesc", Some(attribute), None)
    }

    pub fn limit(limit: u64) -> Self {
        Self::new("limit", None, Some(vec![limit.into()]))
    }

    pub fn offset(offset: u64) -> Self {
        Self::new("offset", None, Some(vec![offset.into()]))
    }

    pub fn select(attributes: &[&str]) -> Self {
        Self::new(
            "select",
            None,
            Some(attributes.iter().map(|a| Value::from(*a)).collect()),
        )
    }

    pub fn method(&self) -> &str {
        self.method
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn values(&self) -> &[Value] {
        self.values.as_deref().unwrap_or_default()
    }

    /// JSON text sent as the `queries[]` parameter value
    pub fn to_param(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
