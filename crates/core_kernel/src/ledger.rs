//! Ledger Store port
//!
//! The ledger is a flat key-value store of encoded entity records. This
//! module defines what the contract layer needs from it:
//!
//! - point lookups that report absence as `Ok(None)`
//! - unconditional upserts (last write wins)
//! - version-checked writes, used for read-modify-write on claims
//! - equality-selector rich queries returning a closable result set
//!
//! # Consistency
//!
//! Each successful write bumps the key's version. A caller that reads a
//! record at version `v` and writes it back with
//! [`LedgerStore::put_state_if_version`] either wins atomically or receives
//! [`PortError::Conflict`]. Replication, durability and cross-key
//! transactions are the store's business.

use async_trait::async_trait;

use crate::ports::{DomainPort, HealthCheckable, PortError};
use crate::selector::Selector;

/// Monotonic per-key write counter; the first write of a key is version 1
pub type Version = u64;

/// A stored value together with the version it was read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedRecord {
    pub value: Vec<u8>,
    pub version: Version,
}

/// One row of a rich-query result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Lazy, finite, non-restartable rich-query result set
///
/// Holders must call [`QueryResults::close`] once they are done, whether the
/// set was drained or not. Implementations also release their resources on
/// drop, so an early return never leaks a store-side cursor.
#[async_trait]
pub trait QueryResults: Send {
    /// Returns the next matching record, or `None` once exhausted
    async fn next(&mut self) -> Result<Option<KeyValue>, PortError>;

    /// Releases the result set; calling it more than once is a no-op
    async fn close(&mut self) -> Result<(), PortError>;
}

/// Port to the replicated key-value store of record
#[async_trait]
pub trait LedgerStore: DomainPort + HealthCheckable {
    /// Looks up a key
    ///
    /// # Returns
    ///
    /// The record and its current version, or `None` if the key was never written
    async fn get_state(&self, key: &str) -> Result<Option<VersionedRecord>, PortError>;

    /// Writes a value unconditionally
    ///
    /// # Returns
    ///
    /// The key's new version
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<Version, PortError>;

    /// Writes a value only if the key is still at `expected`
    ///
    /// # Errors
    ///
    /// `PortError::Conflict` if the key is absent or at another version
    async fn put_state_if_version(
        &self,
        key: &str,
        expected: Version,
        value: Vec<u8>,
    ) -> Result<Version, PortError>;

    /// Runs an equality-selector query over all stored records
    ///
    /// Order of the results is store-defined.
    async fn rich_query(&self, selector: &Selector) -> Result<Box<dyn QueryResults>, PortError>;
}
