//! Policy Administration Domain
//!
//! Policies reference their holder by `personId`. The holder must exist when
//! the policy is issued; after that the policy is never modified.

pub mod policy;

pub use policy::Policy;
