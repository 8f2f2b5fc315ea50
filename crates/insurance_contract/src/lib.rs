//! Insurance Ledger Contract
//!
//! Records persons, the policies they hold and the claims filed against
//! those policies, on top of a [`core_kernel::LedgerStore`].
//!
//! # Operations
//!
//! - `createPerson`, `createPolicy`, `createClaim` write new records after
//!   checking that every referenced record exists
//! - `queryPerson`, `queryPolicy`, `queryClaim` return stored records as-is
//! - `confirmClaim`, `rejectClaim` decide an open claim
//! - `queryByPersonId` lists every record referencing a person
//!
//! # Example
//!
//! ```ignore
//! let contract = InsuranceContract::new(Arc::new(InMemoryLedgerStore::new()));
//! contract.invoke("createPerson", &["P1".into(), "Alice".into(), "F".into()]).await?;
//! let person = contract.invoke("queryPerson", &["P1".into()]).await?;
//! ```

pub mod config;
pub mod contract;
pub mod error;
pub mod query_index;
pub mod repository;
pub mod request;

pub use config::ContractConfig;
pub use contract::{ContractResponse, InsuranceContract};
pub use error::{ContractError, ErrorKind};
pub use query_index::IndexEntry;
pub use request::{Operation, Request};
