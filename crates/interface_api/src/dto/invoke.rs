//! Generic invocation DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use insurance_contract::ContractResponse;

use crate::error::ApiError;

/// Body of `POST /api/v1/invoke`
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Body of every successful response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub status: &'static str,
    /// Decoded operation payload; `null` for writes
    pub payload: Option<Value>,
}

impl TryFrom<ContractResponse> for SuccessResponse {
    type Error = ApiError;

    fn try_from(response: ContractResponse) -> Result<Self, Self::Error> {
        let payload = response
            .payload_json()
            .transpose()
            .map_err(|e| ApiError::Internal(format!("Stored record is not JSON: {}", e)))?;

        Ok(Self {
            status: "success",
            payload,
        })
    }
}
