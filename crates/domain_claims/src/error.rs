//! Claims domain errors

use thiserror::Error;

use core_kernel::ClaimId;
use crate::lifecycle::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    /// The claim already left the open state
    #[error("Claim already processed {claim_id}")]
    AlreadyProcessed {
        claim_id: ClaimId,
        status: ClaimStatus,
    },
}
