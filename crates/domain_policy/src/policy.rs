//! Insurance policy

use serde::{Deserialize, Serialize};

use core_kernel::{LedgerEntity, PersonId, PolicyNum};
use domain_party::Person;

/// A policy held by a recorded person
///
/// Policies are immutable once recorded. The holder reference is checked
/// when the policy is issued: [`Policy::issue`] takes the holder record, so a
/// policy can only be built for a person that was loaded from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub policy_num: PolicyNum,
    pub plan: String,
    /// Opaque timestamp text supplied by the caller
    pub create_time: String,
    pub insured_amt: u64,
    pub person_id: PersonId,
}

impl Policy {
    /// Issues a policy to an existing person
    pub fn issue(
        policy_num: PolicyNum,
        plan: impl Into<String>,
        create_time: impl Into<String>,
        insured_amt: u64,
        holder: &Person,
    ) -> Self {
        Self {
            policy_num,
            plan: plan.into(),
            create_time: create_time.into(),
            insured_amt,
            person_id: holder.person_id.clone(),
        }
    }

    /// Returns true if the policy is held by the given person
    pub fn is_held_by(&self, person_id: &PersonId) -> bool {
        &self.person_id == person_id
    }
}

impl LedgerEntity for Policy {
    const ENTITY_TYPE: &'static str = "Policy";

    fn ledger_key(&self) -> &str {
        self.policy_num.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Person {
        Person::new(PersonId::new("P1"), "Alice", "F")
    }

    #[test]
    fn test_issue_takes_holder_id() {
        let policy = Policy::issue(PolicyNum::new("POL1"), "Health", "2024-01-01", 10_000, &alice());

        assert_eq!(policy.person_id, PersonId::new("P1"));
        assert!(policy.is_held_by(&PersonId::new("P1")));
        assert!(!policy.is_held_by(&PersonId::new("P2")));
        assert_eq!(policy.ledger_key(), "POL1");
    }

    #[test]
    fn test_policy_layout() {
        let policy = Policy::issue(PolicyNum::new("POL1"), "Health", "2024-01-01", 10_000, &alice());
        let json: serde_json::Value = serde_json::from_slice(&policy.encode().unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "policyNum": "POL1",
                "plan": "Health",
                "createTime": "2024-01-01",
                "insuredAmt": 10000,
                "personId": "P1"
            })
        );
    }
}
