//! Equality selectors for rich queries
//!
//! A selector is a conjunction of `field == value` constraints over the
//! top-level fields of an encoded record. It renders as a CouchDB-style query
//! document and can be evaluated in memory.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Conjunction of field-equality constraints
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selector {
    fields: BTreeMap<String, Value>,
}

impl Selector {
    /// Creates a selector matching records whose `field` equals `value`
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::default().and_eq(field, value)
    }

    /// Adds another equality constraint
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the constrained fields and their expected values
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if the selector has no constraints (matches everything)
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluates the selector against a decoded record
    ///
    /// Non-object records never match a non-empty selector.
    pub fn matches(&self, record: &Value) -> bool {
        match record {
            Value::Object(map) => self
                .fields
                .iter()
                .all(|(field, expected)| map.get(field) == Some(expected)),
            _ => self.fields.is_empty(),
        }
    }

    /// The constraints as a JSON object, e.g. `{"personId":"P1"}`
    ///
    /// For scalar values this is also a JSONB containment document.
    pub fn to_document(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Value::Object(map)
    }

    /// Renders the CouchDB-style query string, e.g. `{"selector":{"personId":"P1"}}`
    pub fn to_query_string(&self) -> String {
        serde_json::json!({ "selector": self.to_document() }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string() {
        let selector = Selector::field_eq("personId", "P1");
        assert_eq!(selector.to_query_string(), r#"{"selector":{"personId":"P1"}}"#);
    }

    #[test]
    fn test_query_string_escapes_values() {
        let selector = Selector::field_eq("personId", "P\"1");
        let parsed: Value = serde_json::from_str(&selector.to_query_string()).unwrap();
        assert_eq!(parsed["selector"]["personId"], "P\"1");
    }

    #[test]
    fn test_matches_equal_field() {
        let selector = Selector::field_eq("personId", "P1");
        assert!(selector.matches(&json!({"personId": "P1", "name": "Alice"})));
        assert!(!selector.matches(&json!({"personId": "P2"})));
        assert!(!selector.matches(&json!({"policyNum": "POL1"})));
    }

    #[test]
    fn test_matches_is_conjunction() {
        let selector = Selector::field_eq("personId", "P1").and_eq("status", "open");
        assert!(selector.matches(&json!({"personId": "P1", "status": "open"})));
        assert!(!selector.matches(&json!({"personId": "P1", "status": "claimed"})));
    }

    #[test]
    fn test_non_object_records() {
        assert!(!Selector::field_eq("personId", "P1").matches(&json!(["P1"])));
        assert!(Selector::default().matches(&json!(42)));
    }
}
