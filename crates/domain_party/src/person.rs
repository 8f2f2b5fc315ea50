//! Insured person

use serde::{Deserialize, Serialize};

use core_kernel::{LedgerEntity, PersonId};

/// A natural person who can hold policies and file claims
///
/// Persons are immutable once recorded. Writing a person under an existing
/// id replaces the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub person_id: PersonId,
    pub name: String,
    pub gender: String,
}

impl Person {
    /// Creates a new person record
    pub fn new(person_id: PersonId, name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            person_id,
            name: name.into(),
            gender: gender.into(),
        }
    }
}

impl LedgerEntity for Person {
    const ENTITY_TYPE: &'static str = "Person";

    fn ledger_key(&self) -> &str {
        self.person_id.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_layout() {
        let person = Person::new(PersonId::new("P1"), "Alice", "F");
        let json: serde_json::Value = serde_json::from_slice(&person.encode().unwrap()).unwrap();

        assert_eq!(json, serde_json::json!({"personId": "P1", "name": "Alice", "gender": "F"}));
        assert_eq!(person.ledger_key(), "P1");
    }

    #[test]
    fn test_person_decode() {
        let person = Person::decode(br#"{"gender":"M","name":"Bob","personId":"P2"}"#).unwrap();
        assert_eq!(person, Person::new(PersonId::new("P2"), "Bob", "M"));
    }
}
