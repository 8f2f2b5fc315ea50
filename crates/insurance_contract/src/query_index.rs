//! Person index query
//!
//! Finds every record carrying a given `personId`: the person itself, its
//! policies and its claims. The result is a JSON array of
//! `{"Key": ..., "Record": ...}` entries in store order.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use core_kernel::{decode_document, CodecError, LedgerStore, PersonId, QueryResults, Selector};

use crate::error::ContractError;

/// Record field every entity uses for its person reference
pub const PERSON_ID_FIELD: &str = "personId";

/// One entry of an index query result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: Value,
}

/// Selector matching records that reference `person_id`
pub fn person_selector(person_id: &PersonId) -> Selector {
    Selector::field_eq(PERSON_ID_FIELD, person_id.as_str())
}

/// Runs the person index query
///
/// The result set is closed on every path once it was opened.
pub async fn query_by_person(
    store: &dyn LedgerStore,
    person_id: &PersonId,
) -> Result<Vec<IndexEntry>, ContractError> {
    let selector = person_selector(person_id);
    debug!(query = %selector.to_query_string(), "Running person index query");

    let mut results = store.rich_query(&selector).await?;
    let collected = collect_entries(results.as_mut()).await;

    match (collected, results.close().await) {
        (Ok(entries), Ok(())) => Ok(entries),
        (Ok(_), Err(close_err)) => Err(close_err.into()),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "Failed to close result set after query error");
            Err(err)
        }
    }
}

/// Drains a result set into index entries
pub async fn collect_entries(results: &mut dyn QueryResults) -> Result<Vec<IndexEntry>, ContractError> {
    let mut entries = Vec::new();
    while let Some(row) = results.next().await? {
        entries.push(IndexEntry {
            record: decode_document(&row.value)?,
            key: row.key,
        });
    }
    Ok(entries)
}

/// Encodes index entries as the query payload
pub fn encode_entries(entries: &[IndexEntry]) -> Result<Vec<u8>, ContractError> {
    serde_json::to_vec(entries).map_err(|source| {
        CodecError::Encode {
            entity_type: "IndexEntry",
            source,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_person_selector_query_string() {
        let selector = person_selector(&PersonId::new("P1"));
        assert_eq!(selector.to_query_string(), r#"{"selector":{"personId":"P1"}}"#);
    }

    #[test]
    fn test_entry_layout() {
        let entries = vec![IndexEntry {
            key: "P1".into(),
            record: json!({ "personId": "P1", "name": "Alice", "gender": "F" }),
        }];
        let payload: Value = serde_json::from_slice(&encode_entries(&entries).unwrap()).unwrap();
        assert_eq!(payload[0]["Key"], "P1");
        assert_eq!(payload[0]["Record"]["name"], "Alice");
    }

    #[test]
    fn test_empty_result_is_empty_array() {
        assert_eq!(encode_entries(&[]).unwrap(), b"[]");
    }
}
