//! Pre-built Test Fixtures
//!
//! The standard scenario used across the suite: person `P1` holding policy
//! `POL1`, with open claim `C1` filed against it.

use core_kernel::{ClaimId, LedgerEntity, LedgerStore, PersonId, PolicyNum};
use domain_claims::Claim;
use domain_party::Person;
use domain_policy::Policy;
use infra_ledger::InMemoryLedgerStore;

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn person_id() -> PersonId {
        PersonId::new("P1")
    }

    /// A person id that is never written by any fixture
    pub fn unknown_person_id() -> PersonId {
        PersonId::new("P404")
    }

    pub fn policy_num() -> PolicyNum {
        PolicyNum::new("POL1")
    }

    pub fn unknown_policy_num() -> PolicyNum {
        PolicyNum::new("POL404")
    }

    pub fn claim_id() -> ClaimId {
        ClaimId::new("C1")
    }

    pub fn unknown_claim_id() -> ClaimId {
        ClaimId::new("C404")
    }
}

/// Fixture for entity records
pub struct RecordFixtures;

impl RecordFixtures {
    /// Alice, person `P1`
    pub fn person() -> Person {
        Person::new(IdFixtures::person_id(), "Alice", "F")
    }

    /// Health policy `POL1` held by `P1`, insured for 10000
    pub fn policy() -> Policy {
        Policy::issue(
            IdFixtures::policy_num(),
            "Health",
            "2024-01-01",
            10_000,
            &Self::person(),
        )
    }

    /// Open claim `C1` for 5000 on `POL1`
    pub fn claim() -> Claim {
        Claim::open(
            IdFixtures::claim_id(),
            5_000,
            "2024-02-01",
            &Self::person(),
            &Self::policy(),
        )
    }
}

/// Fixture for contract invocation arguments
pub struct ArgFixtures;

impl ArgFixtures {
    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    pub fn create_person() -> Vec<String> {
        Self::args(&["P1", "Alice", "F"])
    }

    pub fn create_policy() -> Vec<String> {
        Self::args(&["POL1", "Health", "2024-01-01", "10000", "P1"])
    }

    pub fn create_claim() -> Vec<String> {
        Self::args(&["C1", "5000", "2024-02-01", "P1", "POL1"])
    }

    pub fn confirm_claim() -> Vec<String> {
        Self::args(&["C1", "4500", "approved"])
    }

    pub fn reject_claim() -> Vec<String> {
        Self::args(&["C1", "not covered"])
    }

    pub fn single(value: &str) -> Vec<String> {
        Self::args(&[value])
    }
}

/// Writes an entity straight to a store, bypassing the contract
///
/// # Panics
///
/// Panics if the entity cannot be encoded or the store rejects the write
pub async fn seed_entity<E: LedgerEntity>(store: &dyn LedgerStore, entity: &E) {
    let bytes = entity.encode().expect("Failed to encode fixture entity");
    store
        .put_state(entity.ledger_key(), bytes)
        .await
        .expect("Failed to seed fixture entity");
}

/// An in-memory store holding the standard person, policy and open claim
pub async fn seeded_store() -> InMemoryLedgerStore {
    let store = InMemoryLedgerStore::new();
    seed_entity(&store, &RecordFixtures::person()).await;
    seed_entity(&store, &RecordFixtures::policy()).await;
    seed_entity(&store, &RecordFixtures::claim()).await;
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_reference_each_other() {
        let policy = RecordFixtures::policy();
        let claim = RecordFixtures::claim();

        assert!(policy.is_held_by(&IdFixtures::person_id()));
        assert_eq!(claim.policy_num, policy.policy_num);
        assert!(claim.is_open());
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = seeded_store().await;
        assert_eq!(store.keys().await, vec!["C1", "P1", "POL1"]);
    }
}
