//! Custom Test Assertions
//!
//! Assertion helpers for ledger contents and operation results that give
//! more meaningful failure messages than plain `assert_eq!`.

use core_kernel::{decode_document, LedgerEntity, LedgerStore};

/// Asserts that a key holds exactly the given entity
///
/// # Panics
///
/// Panics if the key is absent, undecodable, or holds a different record
pub async fn assert_stored<E>(store: &dyn LedgerStore, expected: &E)
where
    E: LedgerEntity + PartialEq + std::fmt::Debug,
{
    let key = expected.ledger_key();
    let record = store
        .get_state(key)
        .await
        .unwrap_or_else(|e| panic!("Store failed reading {}: {}", key, e))
        .unwrap_or_else(|| panic!("Expected {} {} to be stored, found nothing", E::ENTITY_TYPE, key));

    let actual = E::decode(&record.value)
        .unwrap_or_else(|e| panic!("Stored {} is not a valid {}: {}", key, E::ENTITY_TYPE, e));
    assert_eq!(&actual, expected, "Stored {} {} differs", E::ENTITY_TYPE, key);
}

/// Asserts that a key was never written
pub async fn assert_absent(store: &dyn LedgerStore, key: &str) {
    let record = store
        .get_state(key)
        .await
        .unwrap_or_else(|e| panic!("Store failed reading {}: {}", key, e));
    assert!(
        record.is_none(),
        "Expected {} to be absent, found {:?}",
        key,
        record.map(|r| String::from_utf8_lossy(&r.value).into_owned())
    );
}

/// Asserts that a key is at the given version
pub async fn assert_version(store: &dyn LedgerStore, key: &str, expected: u64) {
    let version = store
        .get_state(key)
        .await
        .unwrap_or_else(|e| panic!("Store failed reading {}: {}", key, e))
        .map(|r| r.version);
    assert_eq!(version, Some(expected), "Unexpected version for {}", key);
}

/// Extracts the `Key` fields of an index query payload, in order
///
/// # Panics
///
/// Panics if the payload is not a JSON array of `{"Key", "Record"}` entries
pub fn index_keys(payload: &[u8]) -> Vec<String> {
    let doc = decode_document(payload).unwrap_or_else(|e| panic!("Payload is not JSON: {}", e));
    let entries = doc
        .as_array()
        .unwrap_or_else(|| panic!("Expected a JSON array, got {}", doc));

    entries
        .iter()
        .map(|entry| {
            assert!(entry.get("Record").is_some(), "Entry without Record: {}", entry);
            entry["Key"]
                .as_str()
                .unwrap_or_else(|| panic!("Entry without string Key: {}", entry))
                .to_string()
        })
        .collect()
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that a result failed with the given error kind
///
/// Works with any error type exposing `kind()`; returns the error.
#[macro_export]
macro_rules! assert_err_kind {
    ($result:expr, $kind:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err of kind {:?}, got Ok({:?})", $kind, value),
            Err(e) => {
                assert_eq!(e.kind(), $kind, "Unexpected error kind for {:?}", e);
                e
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{seeded_store, RecordFixtures};

    #[test]
    fn test_index_keys() {
        let payload = br#"[{"Key":"P1","Record":{}},{"Key":"POL1","Record":{}}]"#;
        assert_eq!(index_keys(payload), vec!["P1", "POL1"]);
        assert!(index_keys(b"[]").is_empty());
    }

    #[test]
    #[should_panic(expected = "Expected a JSON array")]
    fn test_index_keys_rejects_objects() {
        index_keys(br#"{"Key":"P1"}"#);
    }

    #[test]
    fn test_assert_ok_returns_value() {
        let value: Result<u32, String> = Ok(3);
        assert_eq!(assert_ok!(value), 3);
    }

    #[test]
    #[should_panic(expected = "Expected Err")]
    fn test_assert_err_panics_on_ok() {
        let value: Result<u32, String> = Ok(3);
        assert_err!(value);
    }

    #[tokio::test]
    async fn test_store_assertions() {
        let store = seeded_store().await;
        assert_stored(&store, &RecordFixtures::claim()).await;
        assert_version(&store, "P1", 1).await;
        assert_absent(&store, "P2").await;
    }
}
