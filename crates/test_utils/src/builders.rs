//! Test Data Builders
//!
//! Builders for ledger records. Tests set only the fields they care about;
//! names and identifiers default to generated values so records built in
//! one test never collide.

use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;

use core_kernel::{ClaimId, PersonId, PolicyNum};
use domain_claims::Claim;
use domain_party::Person;
use domain_policy::Policy;

use crate::fixtures::RecordFixtures;

fn generated_key(prefix: &str) -> String {
    format!("{}{}", prefix, (1_000_000u32..9_999_999).fake::<u32>())
}

/// Builder for person records
pub struct PersonBuilder {
    person_id: PersonId,
    name: String,
    gender: String,
}

impl Default for PersonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonBuilder {
    pub fn new() -> Self {
        Self {
            person_id: PersonId::new(generated_key("P")),
            name: Name().fake(),
            gender: if (0..2).fake::<u8>() == 0 { "F" } else { "M" }.to_string(),
        }
    }

    pub fn with_id(mut self, id: impl Into<PersonId>) -> Self {
        self.person_id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn build(self) -> Person {
        Person::new(self.person_id, self.name, self.gender)
    }
}

/// Builder for policy records
pub struct PolicyBuilder {
    policy_num: PolicyNum,
    plan: String,
    create_time: String,
    insured_amt: u64,
    holder: Person,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBuilder {
    /// Starts a policy held by the standard fixture person
    pub fn new() -> Self {
        Self {
            policy_num: PolicyNum::new(generated_key("POL")),
            plan: Word().fake(),
            create_time: "2024-01-01".to_string(),
            insured_amt: (1_000u64..1_000_000).fake(),
            holder: RecordFixtures::person(),
        }
    }

    pub fn with_num(mut self, num: impl Into<PolicyNum>) -> Self {
        self.policy_num = num.into();
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = plan.into();
        self
    }

    pub fn with_create_time(mut self, create_time: impl Into<String>) -> Self {
        self.create_time = create_time.into();
        self
    }

    pub fn with_insured_amt(mut self, amount: u64) -> Self {
        self.insured_amt = amount;
        self
    }

    pub fn held_by(mut self, holder: &Person) -> Self {
        self.holder = holder.clone();
        self
    }

    pub fn build(self) -> Policy {
        Policy::issue(
            self.policy_num,
            self.plan,
            self.create_time,
            self.insured_amt,
            &self.holder,
        )
    }
}

/// Builder for open claim records
pub struct ClaimBuilder {
    claim_id: ClaimId,
    claim_amt: i64,
    create_time: String,
    claimant: Person,
    policy: Policy,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Starts a claim by the fixture person against the fixture policy
    pub fn new() -> Self {
        Self {
            claim_id: ClaimId::new(generated_key("C")),
            claim_amt: (100i64..100_000).fake(),
            create_time: "2024-02-01".to_string(),
            claimant: RecordFixtures::person(),
            policy: RecordFixtures::policy(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ClaimId>) -> Self {
        self.claim_id = id.into();
        self
    }

    pub fn with_claim_amt(mut self, amount: i64) -> Self {
        self.claim_amt = amount;
        self
    }

    pub fn with_create_time(mut self, create_time: impl Into<String>) -> Self {
        self.create_time = create_time.into();
        self
    }

    pub fn filed_by(mut self, claimant: &Person) -> Self {
        self.claimant = claimant.clone();
        self
    }

    pub fn against(mut self, policy: &Policy) -> Self {
        self.policy = policy.clone();
        self
    }

    pub fn build(self) -> Claim {
        Claim::open(
            self.claim_id,
            self.claim_amt,
            self.create_time,
            &self.claimant,
            &self.policy,
        )
    }
}
