//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! insurance ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: The standard person, policy and claim records
//! - `builders`: Builders for records, with generated defaults
//! - `database`: PostgreSQL test containers backing a `PgLedgerStore`
//! - `assertions`: Assertion helpers for results and ledger contents
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
