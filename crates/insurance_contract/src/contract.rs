//! The insurance ledger contract

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{ClaimId, LedgerStore, PersonId, PolicyNum};
use domain_claims::{Claim, ClaimTransition};
use domain_party::Person;
use domain_policy::Policy;

use crate::config::ContractConfig;
use crate::error::ContractError;
use crate::query_index;
use crate::repository::LedgerRepository;
use crate::request::{ConfirmClaim, CreateClaim, CreatePerson, CreatePolicy, RejectClaim, Request};

/// Success result of a contract operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractResponse {
    payload: Option<Vec<u8>>,
}

impl ContractResponse {
    /// A success with no payload, returned by writes
    pub fn empty() -> Self {
        Self { payload: None }
    }

    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self { payload: Some(payload) }
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn into_payload(self) -> Option<Vec<u8>> {
        self.payload
    }

    /// Decodes the payload as JSON, if there is one
    pub fn payload_json(&self) -> Option<serde_json::Result<serde_json::Value>> {
        self.payload.as_deref().map(serde_json::from_slice)
    }
}

/// Entry point for all ledger operations
///
/// Each invocation performs at most one write, and only after every check
/// passed. Writes of persons and policies are unconditional; claim decisions
/// are written back with a version check so two concurrent decisions on one
/// claim cannot both succeed.
#[derive(Clone)]
pub struct InsuranceContract {
    store: Arc<dyn LedgerStore>,
    config: ContractConfig,
}

impl InsuranceContract {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self::with_config(store, ContractConfig::default())
    }

    pub fn with_config(store: Arc<dyn LedgerStore>, config: ContractConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    /// Dispatches an operation by name with positional arguments
    #[instrument(skip(self, args), fields(arg_count = args.len()))]
    pub async fn invoke(&self, function: &str, args: &[String]) -> Result<ContractResponse, ContractError> {
        let request = Request::parse(function, args, &self.config)
            .inspect_err(|err| warn!(kind = %err.kind(), error = %err, "Request rejected"))?;
        self.execute(request).await
    }

    /// Executes a parsed request
    ///
    /// Requests naming an empty key are rejected before the store is touched.
    pub async fn execute(&self, request: Request) -> Result<ContractResponse, ContractError> {
        let operation = request.operation();
        let result = match request.validate_keys() {
            Ok(()) => self.dispatch(request).await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(_) if operation.is_write() => info!(%operation, "Ledger updated"),
            Ok(_) => debug!(%operation, "Query served"),
            Err(err) => warn!(%operation, kind = %err.kind(), error = %err, "Operation rejected"),
        }
        result
    }

    async fn dispatch(&self, request: Request) -> Result<ContractResponse, ContractError> {
        match request {
            Request::CreatePerson(req) => self.create_person(req).await,
            Request::CreatePolicy(req) => self.create_policy(req).await,
            Request::CreateClaim(req) => self.create_claim(req).await,
            Request::QueryPerson(id) => self.query_person(&id).await,
            Request::QueryPolicy(num) => self.query_policy(&num).await,
            Request::QueryClaim(id) => self.query_claim(&id).await,
            Request::ConfirmClaim(req) => self.confirm_claim(req).await,
            Request::RejectClaim(req) => self.reject_claim(req).await,
            Request::QueryByPersonId(id) => self.query_by_person_id(&id).await,
        }
    }

    fn repository(&self) -> LedgerRepository<'_> {
        LedgerRepository::new(self.store.as_ref())
    }

    async fn create_person(&self, req: CreatePerson) -> Result<ContractResponse, ContractError> {
        let person = Person::new(req.person_id, req.name, req.gender);
        self.repository().save(&person).await?;
        Ok(ContractResponse::empty())
    }

    async fn create_policy(&self, req: CreatePolicy) -> Result<ContractResponse, ContractError> {
        let repo = self.repository();
        let (holder, _) = repo
            .require::<Person>(req.person_id.as_str(), PersonId::label())
            .await?;

        let policy = Policy::issue(req.policy_num, req.plan, req.create_time, req.insured_amt, &holder);
        repo.save(&policy).await?;
        Ok(ContractResponse::empty())
    }

    async fn create_claim(&self, req: CreateClaim) -> Result<ContractResponse, ContractError> {
        let repo = self.repository();
        let (policy, _) = repo
            .require::<Policy>(req.policy_num.as_str(), PolicyNum::label())
            .await?;
        let (claimant, _) = repo
            .require::<Person>(req.person_id.as_str(), PersonId::label())
            .await?;

        let claim = Claim::open(req.claim_id, req.claim_amt, req.create_time, &claimant, &policy);
        repo.save(&claim).await?;
        Ok(ContractResponse::empty())
    }

    async fn query_person(&self, person_id: &PersonId) -> Result<ContractResponse, ContractError> {
        let bytes = self
            .repository()
            .load_raw(person_id.as_str(), PersonId::label())
            .await?;
        Ok(ContractResponse::with_payload(bytes))
    }

    async fn query_policy(&self, policy_num: &PolicyNum) -> Result<ContractResponse, ContractError> {
        let bytes = self
            .repository()
            .load_raw(policy_num.as_str(), PolicyNum::label())
            .await?;
        Ok(ContractResponse::with_payload(bytes))
    }

    async fn query_claim(&self, claim_id: &ClaimId) -> Result<ContractResponse, ContractError> {
        let bytes = self
            .repository()
            .load_raw(claim_id.as_str(), ClaimId::label())
            .await?;
        Ok(ContractResponse::with_payload(bytes))
    }

    async fn confirm_claim(&self, req: ConfirmClaim) -> Result<ContractResponse, ContractError> {
        self.decide_claim(
            &req.claim_id,
            ClaimTransition::Confirm {
                claimed_amt: req.claimed_amt,
                remarks: req.remarks,
            },
        )
        .await
    }

    async fn reject_claim(&self, req: RejectClaim) -> Result<ContractResponse, ContractError> {
        self.decide_claim(&req.claim_id, ClaimTransition::Reject { remarks: req.remarks })
            .await
    }

    async fn decide_claim(
        &self,
        claim_id: &ClaimId,
        transition: ClaimTransition,
    ) -> Result<ContractResponse, ContractError> {
        let repo = self.repository();
        let (mut claim, version) = repo
            .require::<Claim>(claim_id.as_str(), ClaimId::label())
            .await?;

        claim.apply(transition)?;
        repo.save_if_version(&claim, version).await?;
        Ok(ContractResponse::empty())
    }

    async fn query_by_person_id(&self, person_id: &PersonId) -> Result<ContractResponse, ContractError> {
        let entries = query_index::query_by_person(self.store.as_ref(), person_id).await?;
        debug!(person_id = %person_id, matches = entries.len(), "Person index query complete");
        Ok(ContractResponse::with_payload(query_index::encode_entries(&entries)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_payload() {
        assert_eq!(ContractResponse::empty().payload(), None);

        let response = ContractResponse::with_payload(br#"{"a":1}"#.to_vec());
        let json = response.payload_json().unwrap().unwrap();
        assert_eq!(json["a"], 1);
        assert_eq!(response.into_payload().unwrap(), br#"{"a":1}"#.to_vec());
    }
}
