//! Policy DTOs

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolicyRequest {
    pub policy_num: String,
    pub plan: String,
    pub create_time: String,
    pub insured_amt: u64,
    pub person_id: String,
}
