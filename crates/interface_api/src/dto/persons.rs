//! Person DTOs

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    pub person_id: String,
    pub name: String,
    pub gender: String,
}
