//! Person handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::PersonId;
use insurance_contract::request::{self, Request};

use crate::dto::{persons::CreatePersonRequest, SuccessResponse};
use crate::{error::ApiError, AppState};

/// Records a person
pub async fn create_person(
    State(state): State<AppState>,
    body: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    let Json(body) = body?;
    let response = state
        .contract
        .execute(Request::CreatePerson(request::CreatePerson {
            person_id: PersonId::new(body.person_id),
            name: body.name,
            gender: body.gender,
        }))
        .await?;
    Ok((StatusCode::CREATED, Json(response.try_into()?)))
}

/// Gets a person by id
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let response = state.contract.execute(Request::QueryPerson(PersonId::new(id))).await?;
    Ok(Json(response.try_into()?))
}

/// Lists every record referencing a person
pub async fn get_person_records(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let response = state
        .contract
        .execute(Request::QueryByPersonId(PersonId::new(id)))
        .await?;
    Ok(Json(response.try_into()?))
}
