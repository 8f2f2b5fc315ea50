//! Claims DTOs

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    pub claim_id: String,
    pub claim_amt: i64,
    pub create_time: String,
    pub person_id: String,
    pub policy_num: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmClaimRequest {
    pub claimed_amt: i64,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectClaimRequest {
    #[serde(default)]
    pub remarks: String,
}
