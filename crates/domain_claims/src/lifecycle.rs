//! Claim lifecycle state machine
//!
//! ```text
//!          confirm
//!   open ──────────► claimed
//!     │
//!     │    reject
//!     └────────────► rejected
//! ```
//!
//! `claimed` and `rejected` are terminal. A claim is processed exactly once.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Filed, awaiting a decision
    Open,
    /// Approved; `claimedAmt` holds the approved amount
    Claimed,
    /// Rejected
    Rejected,
}

impl ClaimStatus {
    /// Returns the wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Open => "open",
            ClaimStatus::Claimed => "claimed",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Returns true if no transition leaves this status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Open)
    }

    /// Checks if a transition is valid
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!((self, target), (Open, Claimed) | (Open, Rejected))
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision applied to an open claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimTransition {
    /// Approve the claim for `claimed_amt`
    Confirm { claimed_amt: i64, remarks: String },
    /// Reject the claim
    Reject { remarks: String },
}

impl ClaimTransition {
    /// Status the claim ends up in
    pub fn target(&self) -> ClaimStatus {
        match self {
            ClaimTransition::Confirm { .. } => ClaimStatus::Claimed,
            ClaimTransition::Reject { .. } => ClaimStatus::Rejected,
        }
    }

    /// Remarks recorded with the decision
    pub fn remarks(&self) -> &str {
        match self {
            ClaimTransition::Confirm { remarks, .. } | ClaimTransition::Reject { remarks } => remarks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_open_transitions() {
        use ClaimStatus::*;
        for from in [Open, Claimed, Rejected] {
            for to in [Open, Claimed, Rejected] {
                let expected = from == Open && to != Open;
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ClaimStatus::Open.is_terminal());
        assert!(ClaimStatus::Claimed.is_terminal());
        assert!(ClaimStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&ClaimStatus::Claimed).unwrap(), "\"claimed\"");
        let parsed: ClaimStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(parsed, ClaimStatus::Rejected);
    }

    #[test]
    fn test_transition_target() {
        let confirm = ClaimTransition::Confirm { claimed_amt: 10, remarks: "ok".into() };
        assert_eq!(confirm.target(), ClaimStatus::Claimed);
        assert_eq!(confirm.remarks(), "ok");

        let reject = ClaimTransition::Reject { remarks: "no".into() };
        assert_eq!(reject.target(), ClaimStatus::Rejected);
    }
}
