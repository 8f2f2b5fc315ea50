//! Ledger Store Infrastructure
//!
//! Adapters implementing the `LedgerStore` port from `core_kernel`:
//!
//! - [`InMemoryLedgerStore`]: `BTreeMap` behind an async `RwLock`; used by
//!   tests and when the API runs without a database
//! - [`PgLedgerStore`]: PostgreSQL, JSONB values, cursor-backed rich queries
//!
//! Both adapters version every key and implement the conditional write the
//! claim lifecycle depends on.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_ledger::{create_pool, run_migrations, DatabaseConfig, PgLedgerStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/insurance_ledger")).await?;
//! run_migrations(&pool).await?;
//! let store = PgLedgerStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod memory;
pub mod postgres;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use error::DatabaseError;
pub use memory::{InMemoryLedgerStore, BufferedQueryResults};
pub use postgres::{PgLedgerStore, PgQueryResults};
