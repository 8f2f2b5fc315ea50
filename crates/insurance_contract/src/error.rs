//! Contract errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use core_kernel::{CodecError, PortError};
use domain_claims::ClaimError;

/// Classification of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced or queried entity is absent
    NotFound,
    /// An argument is missing or malformed
    InvalidArgument,
    /// The claim already left the open state
    InvalidState,
    /// The operation name is not recognised
    UnknownOperation,
    /// A conditional write lost against a concurrent writer
    Conflict,
    /// The ledger store failed or returned an unreadable record
    StoreFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::UnknownOperation => "unknown_operation",
            ErrorKind::Conflict => "conflict",
            ErrorKind::StoreFailure => "store_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure result of a contract operation
///
/// Every failure aborts the operation before its single write.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Could not find {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    InvalidState(#[from] ClaimError),

    /// Carries the rejected operation name
    #[error("Invalid Smart Contract function name.")]
    UnknownOperation(String),

    #[error("Claim {key} was modified concurrently")]
    Conflict { key: String },

    #[error(transparent)]
    Store(#[from] PortError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl ContractError {
    /// Creates a NotFound error for an entity label and id
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        ContractError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ContractError::InvalidArgument(message.into())
    }

    /// Classifies the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::NotFound { .. } => ErrorKind::NotFound,
            ContractError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ContractError::InvalidState(_) => ErrorKind::InvalidState,
            ContractError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            ContractError::Conflict { .. } => ErrorKind::Conflict,
            ContractError::Store(_) | ContractError::Codec(_) => ErrorKind::StoreFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClaimId;
    use domain_claims::ClaimStatus;

    #[test]
    fn test_messages() {
        assert_eq!(
            ContractError::not_found("person", "P1").to_string(),
            "Could not find person P1"
        );
        assert_eq!(
            ContractError::UnknownOperation("deleteClaim".into()).to_string(),
            "Invalid Smart Contract function name."
        );

        let processed = ContractError::from(ClaimError::AlreadyProcessed {
            claim_id: ClaimId::new("C1"),
            status: ClaimStatus::Claimed,
        });
        assert_eq!(processed.to_string(), "Claim already processed C1");
        assert_eq!(processed.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_store_failures_keep_store_message() {
        let err = ContractError::from(PortError::query("syntax error at or near \"@>\""));
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::InvalidArgument.to_string(), "invalid_argument");
        assert_eq!(serde_json::to_string(&ErrorKind::NotFound).unwrap(), "\"not_found\"");
    }
}
