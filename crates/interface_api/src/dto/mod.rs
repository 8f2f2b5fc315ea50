//! Request and response bodies

pub mod claims;
pub mod invoke;
pub mod persons;
pub mod policies;

pub use invoke::{InvokeRequest, SuccessResponse};
