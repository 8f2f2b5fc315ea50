//! Property tests for selectors and the entity codec

use core_kernel::{decode_document, LedgerEntity, Selector};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Holding {
    holding_id: String,
    person_id: String,
    units: i64,
}

impl LedgerEntity for Holding {
    const ENTITY_TYPE: &'static str = "Holding";

    fn ledger_key(&self) -> &str {
        &self.holding_id
    }
}

fn holding_strategy() -> impl Strategy<Value = Holding> {
    ("H[0-9]{1,3}", "P[1-3]", any::<i64>()).prop_map(|(holding_id, person_id, units)| Holding {
        holding_id,
        person_id,
        units,
    })
}

proptest! {
    #[test]
    fn selector_matches_its_own_owner(holding in holding_strategy()) {
        let doc = decode_document(&holding.encode().unwrap()).unwrap();
        let selector = Selector::field_eq("personId", holding.person_id.as_str());
        prop_assert!(selector.matches(&doc));
    }

    #[test]
    fn selector_rejects_other_owners(holding in holding_strategy(), other in "P[4-6]") {
        let doc = decode_document(&holding.encode().unwrap()).unwrap();
        prop_assert!(!Selector::field_eq("personId", other).matches(&doc));
    }

    #[test]
    fn conjunction_requires_every_field(holding in holding_strategy()) {
        let doc = decode_document(&holding.encode().unwrap()).unwrap();
        let both = Selector::field_eq("personId", holding.person_id.as_str()).and_eq("units", holding.units);
        let wrong_units = Selector::field_eq("personId", holding.person_id.as_str())
            .and_eq("units", holding.units.wrapping_add(1));

        prop_assert!(both.matches(&doc));
        prop_assert!(!wrong_units.matches(&doc));
    }

    #[test]
    fn decoded_entity_equals_original(holding in holding_strategy()) {
        prop_assert_eq!(Holding::decode(&holding.encode().unwrap()).unwrap(), holding);
    }
}

#[test]
fn test_missing_field_never_matches() {
    let doc = json!({ "holdingId": "H1", "units": 3 });
    assert!(!Selector::field_eq("personId", "P1").matches(&doc));
}

#[test]
fn test_query_string_is_couch_style() {
    let selector = Selector::field_eq("personId", "P1");
    let parsed: Value = serde_json::from_str(&selector.to_query_string()).unwrap();
    assert_eq!(parsed, json!({ "selector": { "personId": "P1" } }));
}

#[test]
fn test_wrong_entity_kind_fails_to_decode() {
    let person = br#"{"personId":"P1","name":"Alice","gender":"F"}"#;
    let err = Holding::decode(person).unwrap_err();
    assert_eq!(err.entity_type(), "Holding");
}
