//! Core Kernel - Foundational types for the insurance ledger
//!
//! This crate provides the building blocks shared by every other crate:
//! - Ledger keys for persons, policies and claims
//! - The entity codec (`LedgerEntity`)
//! - The ledger store port and rich-query selectors
//! - Port error and health-check types

pub mod identifiers;
pub mod entity;
pub mod selector;
pub mod ledger;
pub mod ports;
pub mod error;

pub use identifiers::{PersonId, PolicyNum, ClaimId};
pub use entity::{LedgerEntity, decode_document};
pub use selector::Selector;
pub use ledger::{LedgerStore, QueryResults, KeyValue, VersionedRecord, Version};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CodecError;
