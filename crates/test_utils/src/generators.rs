//! Property-Based Test Generators
//!
//! Provides proptest strategies for ledger identifiers, records and raw
//! invocation arguments.

use proptest::prelude::*;

use core_kernel::{ClaimId, PersonId, PolicyNum};
use domain_claims::Claim;
use domain_party::Person;
use domain_policy::Policy;

/// Strategy for person ids from a small pool, so generated records collide
pub fn person_id_strategy() -> impl Strategy<Value = PersonId> {
    (1u8..=5).prop_map(|n| PersonId::new(format!("P{}", n)))
}

pub fn policy_num_strategy() -> impl Strategy<Value = PolicyNum> {
    "POL[0-9]{1,4}".prop_map(PolicyNum::new)
}

pub fn claim_id_strategy() -> impl Strategy<Value = ClaimId> {
    "C[0-9]{1,4}".prop_map(ClaimId::new)
}

/// Strategy for free-text fields such as names and remarks
pub fn text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z ]{1,24}"
}

/// Strategy for caller-supplied timestamp text
pub fn create_time_strategy() -> impl Strategy<Value = String> {
    (2000u32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d))
}

/// Strategy for amounts in either sign
pub fn amount_strategy() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..1_000_000_000i64
}

/// Strategy for argument text that does not parse as an integer
pub fn non_numeric_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9.]{0,8}"
}

pub fn person_strategy() -> impl Strategy<Value = Person> {
    (person_id_strategy(), text_strategy(), prop_oneof![Just("F"), Just("M")])
        .prop_map(|(id, name, gender)| Person::new(id, name, gender))
}

pub fn policy_strategy() -> impl Strategy<Value = Policy> {
    (
        policy_num_strategy(),
        text_strategy(),
        create_time_strategy(),
        0u64..10_000_000,
        person_strategy(),
    )
        .prop_map(|(num, plan, time, insured, holder)| Policy::issue(num, plan, time, insured, &holder))
}

/// Strategy for open claims; claimant and policy holder may differ
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        claim_id_strategy(),
        amount_strategy(),
        create_time_strategy(),
        person_strategy(),
        policy_strategy(),
    )
        .prop_map(|(id, amount, time, claimant, policy)| Claim::open(id, amount, time, &claimant, &policy))
}
