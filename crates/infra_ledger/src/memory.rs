//! In-memory ledger store
//!
//! `BTreeMap`-backed implementation of the ledger store port for tests,
//! embedding, and running the API without a database. Rich queries scan
//! every record and return matches in key order.

use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{
    decode_document, DomainPort, HealthCheckResult, HealthCheckable, KeyValue, LedgerStore,
    PortError, QueryResults, Selector, Version, VersionedRecord,
};

/// In-memory ledger store
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    records: RwLock<BTreeMap<String, VersionedRecord>>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if the store holds no keys
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// All stored keys, in order
    pub async fn keys(&self) -> Vec<String> {
        self.records.read().await.keys().cloned().collect()
    }
}

impl DomainPort for InMemoryLedgerStore {}

#[async_trait]
impl HealthCheckable for InMemoryLedgerStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-ledger-store", 0)
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn get_state(&self, key: &str) -> Result<Option<VersionedRecord>, PortError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<Version, PortError> {
        let mut records = self.records.write().await;
        let version = records.get(key).map_or(1, |r| r.version + 1);
        records.insert(key.to_string(), VersionedRecord { value, version });
        Ok(version)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn put_state_if_version(
        &self,
        key: &str,
        expected: Version,
        value: Vec<u8>,
    ) -> Result<Version, PortError> {
        let mut records = self.records.write().await;
        let current = records.get(key).map(|r| r.version);
        if current != Some(expected) {
            return Err(PortError::version_conflict(key, expected, current));
        }

        let version = expected + 1;
        records.insert(key.to_string(), VersionedRecord { value, version });
        Ok(version)
    }

    #[instrument(skip(self, selector), fields(selector = %selector.to_query_string()))]
    async fn rich_query(&self, selector: &Selector) -> Result<Box<dyn QueryResults>, PortError> {
        let records = self.records.read().await;
        let matches: VecDeque<KeyValue> = records
            .iter()
            .filter(|(key, record)| match decode_document(&record.value) {
                Ok(doc) => selector.matches(&doc),
                Err(_) => {
                    debug!(key = %key, "Skipping non-JSON record");
                    false
                }
            })
            .map(|(key, record)| KeyValue {
                key: key.clone(),
                value: record.value.clone(),
            })
            .collect();

        debug!(matches = matches.len(), "Rich query evaluated");
        Ok(Box::new(BufferedQueryResults::new(matches)))
    }
}

/// Result set over rows already held in memory
#[derive(Debug, Default)]
pub struct BufferedQueryResults {
    rows: VecDeque<KeyValue>,
    closed: bool,
}

impl BufferedQueryResults {
    /// Wraps a list of rows
    pub fn new(rows: impl Into<VecDeque<KeyValue>>) -> Self {
        Self {
            rows: rows.into(),
            closed: false,
        }
    }

    /// Returns `true` once [`QueryResults::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl QueryResults for BufferedQueryResults {
    async fn next(&mut self) -> Result<Option<KeyValue>, PortError> {
        if self.closed {
            return Err(PortError::query("result set already closed"));
        }
        Ok(self.rows.pop_front())
    }

    async fn close(&mut self) -> Result<(), PortError> {
        self.closed = true;
        self.rows.clear();
        Ok(())
    }
}
