//! Contract configuration

use serde::Deserialize;

/// Behaviour switches for the contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Reject a non-numeric `claimAmt` on `createClaim` instead of recording 0
    ///
    /// Off by default: deployed clients rely on unparsable amounts being
    /// accepted as zero.
    pub strict_claim_amount: bool,
}

impl ContractConfig {
    /// Configuration that rejects unparsable claim amounts
    pub fn strict() -> Self {
        Self {
            strict_claim_amount: true,
        }
    }
}
