//! Claims handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::{ClaimId, PersonId, PolicyNum};
use insurance_contract::request::{self, Request};

use crate::dto::claims::{ConfirmClaimRequest, CreateClaimRequest, RejectClaimRequest};
use crate::dto::SuccessResponse;
use crate::{error::ApiError, AppState};

/// Files a claim against a recorded policy
pub async fn create_claim(
    State(state): State<AppState>,
    body: Result<Json<CreateClaimRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    let Json(body) = body?;
    let response = state
        .contract
        .execute(Request::CreateClaim(request::CreateClaim {
            claim_id: ClaimId::new(body.claim_id),
            claim_amt: body.claim_amt,
            create_time: body.create_time,
            person_id: PersonId::new(body.person_id),
            policy_num: PolicyNum::new(body.policy_num),
        }))
        .await?;
    Ok((StatusCode::CREATED, Json(response.try_into()?)))
}

/// Gets a claim by id
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let response = state.contract.execute(Request::QueryClaim(ClaimId::new(id))).await?;
    Ok(Json(response.try_into()?))
}

/// Approves an open claim
pub async fn confirm_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ConfirmClaimRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(body) = body?;
    let response = state
        .contract
        .execute(Request::ConfirmClaim(request::ConfirmClaim {
            claim_id: ClaimId::new(id),
            claimed_amt: body.claimed_amt,
            remarks: body.remarks,
        }))
        .await?;
    Ok(Json(response.try_into()?))
}

/// Rejects an open claim
pub async fn reject_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RejectClaimRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(body) = body?;
    let response = state
        .contract
        .execute(Request::RejectClaim(request::RejectClaim {
            claim_id: ClaimId::new(id),
            remarks: body.remarks,
        }))
        .await?;
    Ok(Json(response.try_into()?))
}
