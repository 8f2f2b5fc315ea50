//! Claims Management Domain
//!
//! Claims against recorded policies and the decision lifecycle.
//!
//! # Claim Lifecycle
//!
//! ```text
//! open -> claimed
//! open -> rejected
//! ```
//!
//! A claim is created open with `claimedAmt = 0` and is decided exactly once.

pub mod claim;
pub mod lifecycle;
pub mod error;

pub use claim::{Claim, INITIAL_REMARKS};
pub use lifecycle::{ClaimStatus, ClaimTransition};
pub use error::ClaimError;
