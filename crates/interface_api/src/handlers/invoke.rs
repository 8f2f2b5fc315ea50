//! Generic operation dispatch

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::dto::{InvokeRequest, SuccessResponse};
use crate::{error::ApiError, AppState};

/// Invokes any contract operation by name
pub async fn invoke(
    State(state): State<AppState>,
    body: Result<Json<InvokeRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(request) = body?;
    let response = state.contract.invoke(&request.function, &request.args).await?;
    Ok(Json(response.try_into()?))
}
