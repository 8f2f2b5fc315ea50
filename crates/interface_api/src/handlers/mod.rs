//! Request handlers

pub mod claims;
pub mod health;
pub mod invoke;
pub mod persons;
pub mod policies;
