//! Entity codec
//!
//! Entities are stored as JSON objects keyed by field name. Field order is
//! not significant; two encodings compare equal when they decode to the same
//! entity.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;

/// A record that lives in the ledger under its own identifier
///
/// The ledger key space is flat: the key is the entity's identifier with no
/// type prefix, so identifiers of different entity kinds share one namespace.
pub trait LedgerEntity: Serialize + DeserializeOwned + Send + Sync {
    /// Name of the entity kind, used in errors and logs
    const ENTITY_TYPE: &'static str;

    /// Key this entity is stored under
    fn ledger_key(&self) -> &str;

    /// Encodes the entity into its canonical byte form
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(|source| CodecError::Encode {
            entity_type: Self::ENTITY_TYPE,
            source,
        })
    }

    /// Decodes an entity from its canonical byte form
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes).map_err(|source| CodecError::Decode {
            entity_type: Self::ENTITY_TYPE,
            source,
        })
    }
}

/// Decodes an arbitrary stored record into a JSON value
///
/// Used where the caller does not know which entity kind a record holds,
/// e.g. when evaluating a selector or assembling query results.
pub fn decode_document(bytes: &[u8]) -> Result<serde_json::Value, CodecError> {
    serde_json::from_slice(bytes).map_err(|source| CodecError::Decode {
        entity_type: "record",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        sample_id: String,
        amount: i64,
    }

    impl LedgerEntity for Sample {
        const ENTITY_TYPE: &'static str = "Sample";

        fn ledger_key(&self) -> &str {
            &self.sample_id
        }
    }

    #[test]
    fn test_encode_uses_field_names() {
        let sample = Sample { sample_id: "S1".to_string(), amount: 7 };
        let doc = decode_document(&sample.encode().unwrap()).unwrap();
        assert_eq!(doc["sampleId"], "S1");
        assert_eq!(doc["amount"], 7);
    }

    #[test]
    fn test_decode_ignores_field_order() {
        let decoded = Sample::decode(br#"{"amount":3,"sampleId":"S9"}"#).unwrap();
        assert_eq!(decoded, Sample { sample_id: "S9".to_string(), amount: 3 });
    }

    #[test]
    fn test_decode_failure_names_entity() {
        let err = Sample::decode(b"not json").unwrap_err();
        assert_eq!(err.entity_type(), "Sample");
        assert!(err.to_string().starts_with("Failed to decode Sample"));
    }
}
