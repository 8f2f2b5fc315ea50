//! Request routing
//!
//! Callers address the contract with an operation name and a positional
//! list of string arguments. [`Request::parse`] turns that into a typed
//! request once, at the boundary: argument counts are checked and amounts
//! parsed here, so handlers only see well-formed values.
//!
//! | Operation | Arguments |
//! |---|---|
//! | `createPerson` | personId, name, gender |
//! | `createPolicy` | policyNum, plan, createTime, insuredAmt, personId |
//! | `createClaim` | claimId, claimAmt, createTime, personId, policyNum |
//! | `queryPerson` | personId |
//! | `queryPolicy` | policyNum |
//! | `queryClaim` | claimId |
//! | `confirmClaim` | claimId, claimedAmt, remarks |
//! | `rejectClaim` | claimId, remarks |
//! | `queryByPersonId` | personId |

use std::fmt;
use std::str::FromStr;
use tracing::warn;

use core_kernel::{ClaimId, PersonId, PolicyNum};

use crate::config::ContractConfig;
use crate::error::ContractError;

/// The fixed set of contract operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreatePerson,
    CreatePolicy,
    CreateClaim,
    QueryPerson,
    QueryPolicy,
    QueryClaim,
    ConfirmClaim,
    RejectClaim,
    QueryByPersonId,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::CreatePerson,
        Operation::CreatePolicy,
        Operation::CreateClaim,
        Operation::QueryPerson,
        Operation::QueryPolicy,
        Operation::QueryClaim,
        Operation::ConfirmClaim,
        Operation::RejectClaim,
        Operation::QueryByPersonId,
    ];

    /// The dispatch name callers use
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreatePerson => "createPerson",
            Operation::CreatePolicy => "createPolicy",
            Operation::CreateClaim => "createClaim",
            Operation::QueryPerson => "queryPerson",
            Operation::QueryPolicy => "queryPolicy",
            Operation::QueryClaim => "queryClaim",
            Operation::ConfirmClaim => "confirmClaim",
            Operation::RejectClaim => "rejectClaim",
            Operation::QueryByPersonId => "queryByPersonId",
        }
    }

    /// Returns true if the operation writes to the ledger
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Operation::CreatePerson
                | Operation::CreatePolicy
                | Operation::CreateClaim
                | Operation::ConfirmClaim
                | Operation::RejectClaim
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ContractError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == name)
            .ok_or_else(|| ContractError::UnknownOperation(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePerson {
    pub person_id: PersonId,
    pub name: String,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePolicy {
    pub policy_num: PolicyNum,
    pub plan: String,
    pub create_time: String,
    pub insured_amt: u64,
    pub person_id: PersonId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClaim {
    pub claim_id: ClaimId,
    pub claim_amt: i64,
    pub create_time: String,
    pub person_id: PersonId,
    pub policy_num: PolicyNum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmClaim {
    pub claim_id: ClaimId,
    pub claimed_amt: i64,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectClaim {
    pub claim_id: ClaimId,
    pub remarks: String,
}

/// A parsed, typed contract request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    CreatePerson(CreatePerson),
    CreatePolicy(CreatePolicy),
    CreateClaim(CreateClaim),
    QueryPerson(PersonId),
    QueryPolicy(PolicyNum),
    QueryClaim(ClaimId),
    ConfirmClaim(ConfirmClaim),
    RejectClaim(RejectClaim),
    QueryByPersonId(PersonId),
}

impl Request {
    /// Parses an operation name and its positional arguments
    ///
    /// # Errors
    ///
    /// - `UnknownOperation` if the name is not one of the nine operations
    /// - `InvalidArgument` if the argument count is wrong or an amount is
    ///   malformed
    pub fn parse(function: &str, args: &[String], config: &ContractConfig) -> Result<Self, ContractError> {
        let operation: Operation = function.parse()?;

        let request = match operation {
            Operation::CreatePerson => {
                let [person_id, name, gender] = expect_args(operation, args)?;
                Request::CreatePerson(CreatePerson {
                    person_id: PersonId::new(person_id.as_str()),
                    name: name.clone(),
                    gender: gender.clone(),
                })
            }
            Operation::CreatePolicy => {
                let [policy_num, plan, create_time, insured_amt, person_id] = expect_args(operation, args)?;
                Request::CreatePolicy(CreatePolicy {
                    policy_num: PolicyNum::new(policy_num.as_str()),
                    plan: plan.clone(),
                    create_time: create_time.clone(),
                    insured_amt: parse_insured_amt(insured_amt)?,
                    person_id: PersonId::new(person_id.as_str()),
                })
            }
            Operation::CreateClaim => {
                let [claim_id, claim_amt, create_time, person_id, policy_num] = expect_args(operation, args)?;
                Request::CreateClaim(CreateClaim {
                    claim_id: ClaimId::new(claim_id.as_str()),
                    claim_amt: parse_claim_amt(claim_amt, config.strict_claim_amount)?,
                    create_time: create_time.clone(),
                    person_id: PersonId::new(person_id.as_str()),
                    policy_num: PolicyNum::new(policy_num.as_str()),
                })
            }
            Operation::QueryPerson => {
                let [person_id] = expect_args(operation, args)?;
                Request::QueryPerson(PersonId::new(person_id.as_str()))
            }
            Operation::QueryPolicy => {
                let [policy_num] = expect_args(operation, args)?;
                Request::QueryPolicy(PolicyNum::new(policy_num.as_str()))
            }
            Operation::QueryClaim => {
                let [claim_id] = expect_args(operation, args)?;
                Request::QueryClaim(ClaimId::new(claim_id.as_str()))
            }
            Operation::ConfirmClaim => {
                let [claim_id, claimed_amt, remarks] = expect_args(operation, args)?;
                Request::ConfirmClaim(ConfirmClaim {
                    claim_id: ClaimId::new(claim_id.as_str()),
                    claimed_amt: parse_claimed_amt(claimed_amt)?,
                    remarks: remarks.clone(),
                })
            }
            Operation::RejectClaim => {
                let [claim_id, remarks] = expect_args(operation, args)?;
                Request::RejectClaim(RejectClaim {
                    claim_id: ClaimId::new(claim_id.as_str()),
                    remarks: remarks.clone(),
                })
            }
            Operation::QueryByPersonId => {
                let [person_id] = expect_args(operation, args)?;
                Request::QueryByPersonId(PersonId::new(person_id.as_str()))
            }
        };

        Ok(request)
    }

    /// The operation this request invokes
    pub fn operation(&self) -> Operation {
        match self {
            Request::CreatePerson(_) => Operation::CreatePerson,
            Request::CreatePolicy(_) => Operation::CreatePolicy,
            Request::CreateClaim(_) => Operation::CreateClaim,
            Request::QueryPerson(_) => Operation::QueryPerson,
            Request::QueryPolicy(_) => Operation::QueryPolicy,
            Request::QueryClaim(_) => Operation::QueryClaim,
            Request::ConfirmClaim(_) => Operation::ConfirmClaim,
            Request::RejectClaim(_) => Operation::RejectClaim,
            Request::QueryByPersonId(_) => Operation::QueryByPersonId,
        }
    }

    /// Ledger keys named by the request, with the label of each
    fn keys(&self) -> Vec<(&str, &'static str)> {
        match self {
            Request::CreatePerson(req) => vec![(req.person_id.as_str(), PersonId::label())],
            Request::CreatePolicy(req) => vec![
                (req.policy_num.as_str(), PolicyNum::label()),
                (req.person_id.as_str(), PersonId::label()),
            ],
            Request::CreateClaim(req) => vec![
                (req.claim_id.as_str(), ClaimId::label()),
                (req.person_id.as_str(), PersonId::label()),
                (req.policy_num.as_str(), PolicyNum::label()),
            ],
            Request::QueryPerson(id) | Request::QueryByPersonId(id) => vec![(id.as_str(), PersonId::label())],
            Request::QueryPolicy(num) => vec![(num.as_str(), PolicyNum::label())],
            Request::QueryClaim(id) => vec![(id.as_str(), ClaimId::label())],
            Request::ConfirmClaim(ConfirmClaim { claim_id, .. })
            | Request::RejectClaim(RejectClaim { claim_id, .. }) => vec![(claim_id.as_str(), ClaimId::label())],
        }
    }

    /// Rejects a request naming an empty ledger key
    ///
    /// # Errors
    ///
    /// `InvalidArgument` naming the first empty key
    pub fn validate_keys(&self) -> Result<(), ContractError> {
        match self.keys().into_iter().find(|(key, _)| key.is_empty()) {
            Some((_, label)) => Err(ContractError::invalid_argument(format!("Empty {} key", label))),
            None => Ok(()),
        }
    }
}

fn expect_args<const N: usize>(operation: Operation, args: &[String]) -> Result<&[String; N], ContractError> {
    <&[String; N]>::try_from(args).map_err(|_| {
        ContractError::invalid_argument(format!(
            "Incorrect number of arguments for {}: expected {}, got {}",
            operation,
            N,
            args.len()
        ))
    })
}

fn parse_insured_amt(raw: &str) -> Result<u64, ContractError> {
    raw.parse::<u64>().map_err(|_| {
        ContractError::invalid_argument(format!("InsuredAmt is not a non-negative integer: {}", raw))
    })
}

fn parse_claimed_amt(raw: &str) -> Result<i64, ContractError> {
    raw.parse::<i64>()
        .map_err(|_| ContractError::invalid_argument(format!("ClaimedAmt is not numeric: {}", raw)))
}

/// Parses `claimAmt`; unless `strict`, an unparsable value is recorded as 0
fn parse_claim_amt(raw: &str, strict: bool) -> Result<i64, ContractError> {
    match raw.parse::<i64>() {
        Ok(amount) => Ok(amount),
        Err(_) if strict => Err(ContractError::invalid_argument(format!(
            "ClaimAmt is not numeric: {}",
            raw
        ))),
        Err(_) => {
            warn!(claim_amt = raw, "Unparsable claim amount recorded as 0");
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn parse(function: &str, values: &[&str]) -> Result<Request, ContractError> {
        Request::parse(function, &args(values), &ContractConfig::default())
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operation() {
        let err = parse("deletePerson", &["P1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOperation);
        assert_eq!(err.to_string(), "Invalid Smart Contract function name.");

        // names are case-sensitive
        assert!(parse("CreatePerson", &["P1", "Alice", "F"]).is_err());
    }

    #[test]
    fn test_parse_create_policy() {
        let request = parse("createPolicy", &["POL1", "Health", "2024-01-01", "10000", "P1"]).unwrap();
        assert_eq!(
            request,
            Request::CreatePolicy(CreatePolicy {
                policy_num: PolicyNum::new("POL1"),
                plan: "Health".into(),
                create_time: "2024-01-01".into(),
                insured_amt: 10_000,
                person_id: PersonId::new("P1"),
            })
        );
        assert_eq!(request.operation(), Operation::CreatePolicy);
    }

    #[test]
    fn test_insured_amt_must_be_non_negative_integer() {
        for bad in ["ten", "-5", "1.5", ""] {
            let err = parse("createPolicy", &["POL1", "Health", "2024-01-01", bad, "P1"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{bad:?}");
        }
    }

    #[test]
    fn test_claimed_amt_must_be_numeric() {
        let err = parse("confirmClaim", &["C1", "lots", "ok"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "ClaimedAmt is not numeric: lots");

        let request = parse("confirmClaim", &["C1", "-20", "refund"]).unwrap();
        assert!(matches!(request, Request::ConfirmClaim(ConfirmClaim { claimed_amt: -20, .. })));
    }

    #[test]
    fn test_claim_amt_is_lenient_by_default() {
        let request = parse("createClaim", &["C1", "5k", "2024-02-01", "P1", "POL1"]).unwrap();
        assert!(matches!(request, Request::CreateClaim(CreateClaim { claim_amt: 0, .. })));
    }

    #[test]
    fn test_claim_amt_strict() {
        let err = Request::parse(
            "createClaim",
            &args(&["C1", "5k", "2024-02-01", "P1", "POL1"]),
            &ContractConfig::strict(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_argument_count() {
        let err = parse("rejectClaim", &["C1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "Incorrect number of arguments for rejectClaim: expected 2, got 1");

        assert!(parse("queryPerson", &["P1", "extra"]).is_err());
        assert!(parse("queryPerson", &[]).is_err());
    }

    #[test]
    fn test_write_operations() {
        let writes: Vec<_> = Operation::ALL.into_iter().filter(Operation::is_write).collect();
        assert_eq!(writes.len(), 5);
        assert!(!Operation::QueryByPersonId.is_write());
    }

    #[test]
    fn test_empty_keys_rejected() {
        let request = parse("createClaim", &["C1", "10", "2024-02-01", "P1", ""]).unwrap();
        let err = request.validate_keys().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "Empty policy key");

        let err = parse("createPerson", &["", "Alice", "F"]).unwrap().validate_keys().unwrap_err();
        assert_eq!(err.to_string(), "Empty person key");

        assert!(parse("queryByPersonId", &["P1"]).unwrap().validate_keys().is_ok());
    }

    #[test]
    fn test_trailing_arguments_rejected() {
        let err = parse("createPerson", &["P1", "Alice", "F", "extra"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "Incorrect number of arguments for createPerson: expected 3, got 4");
    }
}
