//! Party Management Domain
//!
//! Insured persons. A person is the root every policy and claim refers to
//! through its `personId` field.

pub mod person;

pub use person::Person;
