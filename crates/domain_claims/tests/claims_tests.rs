//! Comprehensive tests for domain_claims

use core_kernel::{ClaimId, LedgerEntity, PersonId, PolicyNum};
use domain_party::Person;
use domain_policy::Policy;

use domain_claims::{Claim, ClaimError, ClaimStatus, ClaimTransition, INITIAL_REMARKS};

fn create_test_claim() -> Claim {
    let person = Person::new(PersonId::new("P1"), "Alice", "F");
    let policy = Policy::issue(PolicyNum::new("POL1"), "Health", "2024-01-01", 10_000, &person);

    Claim::open(ClaimId::new("C1"), 5_000, "2024-02-01", &person, &policy)
}

// ============================================================================
// Claim Tests
// ============================================================================

mod claim_tests {
    use super::*;

    #[test]
    fn test_claim_open() {
        let claim = create_test_claim();

        assert_eq!(claim.status, ClaimStatus::Open);
        assert_eq!(claim.claim_amt, 5_000);
        assert_eq!(claim.claimed_amt, 0);
        assert_eq!(claim.remarks, INITIAL_REMARKS);
        assert_eq!(claim.person_id, PersonId::new("P1"));
        assert_eq!(claim.policy_num, PolicyNum::new("POL1"));
        assert!(claim.is_open());
    }

    #[test]
    fn test_claim_open_uses_claimant_not_policy_holder() {
        let holder = Person::new(PersonId::new("P1"), "Alice", "F");
        let other = Person::new(PersonId::new("P2"), "Bob", "M");
        let policy = Policy::issue(PolicyNum::new("POL1"), "Health", "2024-01-01", 10_000, &holder);

        let claim = Claim::open(ClaimId::new("C2"), 100, "2024-02-01", &other, &policy);
        assert_eq!(claim.person_id, PersonId::new("P2"));
    }

    #[test]
    fn test_claim_layout() {
        let claim = create_test_claim();
        let json: serde_json::Value = serde_json::from_slice(&claim.encode().unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "claimId": "C1",
                "claimAmt": 5000,
                "claimedAmt": 0,
                "personId": "P1",
                "policyNum": "POL1",
                "createTime": "2024-02-01",
                "status": "open",
                "remarks": " "
            })
        );
    }
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_confirm_open_claim() {
        let mut claim = create_test_claim();

        claim.confirm(3_000, "approved").unwrap();

        assert_eq!(claim.status, ClaimStatus::Claimed);
        assert_eq!(claim.claimed_amt, 3_000);
        assert_eq!(claim.remarks, "approved");
    }

    #[test]
    fn test_confirm_is_not_bounded_by_claim_amount() {
        let mut claim = create_test_claim();

        claim.confirm(50_000, "over the face amount").unwrap();
        assert_eq!(claim.claimed_amt, 50_000);
    }

    #[test]
    fn test_reject_open_claim() {
        let mut claim = create_test_claim();

        claim.reject("not covered").unwrap();

        assert_eq!(claim.status, ClaimStatus::Rejected);
        assert_eq!(claim.claimed_amt, 0);
        assert_eq!(claim.remarks, "not covered");
    }

    #[test]
    fn test_confirmed_claim_is_terminal() {
        let mut claim = create_test_claim();
        claim.confirm(3_000, "approved").unwrap();

        let err = claim.reject("too late").unwrap_err();
        assert!(matches!(err, ClaimError::AlreadyProcessed { status: ClaimStatus::Claimed, .. }));
        assert_eq!(err.to_string(), "Claim already processed C1");

        assert!(claim.confirm(1, "again").is_err());
        assert_eq!(claim.claimed_amt, 3_000);
        assert_eq!(claim.remarks, "approved");
    }

    #[test]
    fn test_rejected_claim_is_terminal() {
        let mut claim = create_test_claim();
        claim.reject("not covered").unwrap();

        let err = claim.confirm(3_000, "approved").unwrap_err();
        assert!(matches!(err, ClaimError::AlreadyProcessed { status: ClaimStatus::Rejected, .. }));
        assert!(claim.reject("again").is_err());
        assert_eq!(claim.status, ClaimStatus::Rejected);
        assert_eq!(claim.remarks, "not covered");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn transition_strategy() -> impl Strategy<Value = ClaimTransition> {
        prop_oneof![
            (any::<i64>(), "[a-z ]{0,12}")
                .prop_map(|(claimed_amt, remarks)| ClaimTransition::Confirm { claimed_amt, remarks }),
            "[a-z ]{0,12}".prop_map(|remarks| ClaimTransition::Reject { remarks }),
        ]
    }

    proptest! {
        #[test]
        fn only_first_transition_succeeds(transitions in prop::collection::vec(transition_strategy(), 1..6)) {
            let mut claim = create_test_claim();
            let first = transitions[0].clone();

            for (i, transition) in transitions.into_iter().enumerate() {
                let result = claim.apply(transition);
                prop_assert_eq!(result.is_ok(), i == 0);
            }

            prop_assert_eq!(claim.status, first.target());
            prop_assert_eq!(claim.remarks.as_str(), first.remarks());
        }

        #[test]
        fn claim_survives_codec(amount in any::<i64>(), remarks in "[ -~]{0,20}") {
            let mut claim = create_test_claim();
            claim.confirm(amount, remarks).unwrap();

            let decoded = Claim::decode(&claim.encode().unwrap()).unwrap();
            prop_assert_eq!(decoded, claim);
        }
    }
}
