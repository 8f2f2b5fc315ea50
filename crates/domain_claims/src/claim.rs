//! Claim record

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{ClaimId, LedgerEntity, PersonId, PolicyNum};
use domain_party::Person;
use domain_policy::Policy;

use crate::error::ClaimError;
use crate::lifecycle::{ClaimStatus, ClaimTransition};

/// Remarks stored on a claim before any decision is made
pub const INITIAL_REMARKS: &str = " ";

/// A claim filed by a person against a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub claim_id: ClaimId,
    /// Face amount claimed
    pub claim_amt: i64,
    /// Amount approved; 0 until confirmed
    pub claimed_amt: i64,
    pub person_id: PersonId,
    pub policy_num: PolicyNum,
    /// Opaque timestamp text supplied by the caller
    pub create_time: String,
    pub status: ClaimStatus,
    pub remarks: String,
}

impl Claim {
    /// Files a new open claim
    ///
    /// Both references are taken from records loaded from the ledger. The
    /// policy is not required to be held by the claimant.
    pub fn open(
        claim_id: ClaimId,
        claim_amt: i64,
        create_time: impl Into<String>,
        claimant: &Person,
        policy: &Policy,
    ) -> Self {
        Self {
            claim_id,
            claim_amt,
            claimed_amt: 0,
            person_id: claimant.person_id.clone(),
            policy_num: policy.policy_num.clone(),
            create_time: create_time.into(),
            status: ClaimStatus::Open,
            remarks: INITIAL_REMARKS.to_string(),
        }
    }

    /// Applies a decision to the claim
    ///
    /// `claimed_amt` is stored as given; it is not bounded by the claimed
    /// face amount or by the policy's insured amount.
    pub fn apply(&mut self, transition: ClaimTransition) -> Result<(), ClaimError> {
        let target = transition.target();
        if !self.status.can_transition_to(target) {
            return Err(ClaimError::AlreadyProcessed {
                claim_id: self.claim_id.clone(),
                status: self.status,
            });
        }

        match transition {
            ClaimTransition::Confirm { claimed_amt, remarks } => {
                self.claimed_amt = claimed_amt;
                self.remarks = remarks;
            }
            ClaimTransition::Reject { remarks } => {
                self.remarks = remarks;
            }
        }

        debug!(claim_id = %self.claim_id, from = %self.status, to = %target, "Claim transition");
        self.status = target;
        Ok(())
    }

    /// Approves the claim for `claimed_amt`
    pub fn confirm(&mut self, claimed_amt: i64, remarks: impl Into<String>) -> Result<(), ClaimError> {
        self.apply(ClaimTransition::Confirm {
            claimed_amt,
            remarks: remarks.into(),
        })
    }

    /// Rejects the claim
    pub fn reject(&mut self, remarks: impl Into<String>) -> Result<(), ClaimError> {
        self.apply(ClaimTransition::Reject {
            remarks: remarks.into(),
        })
    }

    /// Returns true while the claim awaits a decision
    pub fn is_open(&self) -> bool {
        self.status == ClaimStatus::Open
    }
}

impl LedgerEntity for Claim {
    const ENTITY_TYPE: &'static str = "Claim";

    fn ledger_key(&self) -> &str {
        self.claim_id.as_str()
    }
}
