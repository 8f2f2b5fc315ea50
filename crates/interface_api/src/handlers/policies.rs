//! Policy handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::{PersonId, PolicyNum};
use insurance_contract::request::{self, Request};

use crate::dto::{policies::CreatePolicyRequest, SuccessResponse};
use crate::{error::ApiError, AppState};

/// Issues a policy to a recorded person
pub async fn create_policy(
    State(state): State<AppState>,
    body: Result<Json<CreatePolicyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    let Json(body) = body?;
    let response = state
        .contract
        .execute(Request::CreatePolicy(request::CreatePolicy {
            policy_num: PolicyNum::new(body.policy_num),
            plan: body.plan,
            create_time: body.create_time,
            insured_amt: body.insured_amt,
            person_id: PersonId::new(body.person_id),
        }))
        .await?;
    Ok((StatusCode::CREATED, Json(response.try_into()?)))
}

/// Gets a policy by number
pub async fn get_policy(
    State(state): State<AppState>,
    Path(num): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let response = state.contract.execute(Request::QueryPolicy(PolicyNum::new(num))).await?;
    Ok(Json(response.try_into()?))
}
