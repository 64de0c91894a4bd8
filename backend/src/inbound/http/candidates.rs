//! Candidate API handlers.
//!
//! ```text
//! POST   /v1/candidates       {"firstname":"John","lastname":"Doe","email":"john@example.com","age":30}
//! GET    /v1/candidates?page=1&per_page=10&age=30
//! GET    /v1/candidates/{id}
//! PUT    /v1/candidates/{id}  {"age":31}
//! DELETE /v1/candidates/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Age, Candidate, CandidateUpdate, Email, Error, FirstName, LastName, NewCandidate,
    candidate_not_found,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, candidate_validation_error, null_not_allowed_error, parse_candidate_id,
    parse_list_query,
};

/// Body of `POST /v1/candidates`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateCandidateRequest {
    #[schema(example = "John")]
    pub firstname: String,
    #[serde(default)]
    #[schema(example = "Doe")]
    pub lastname: Option<String>,
    #[schema(example = "john@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = 30)]
    pub age: Option<i32>,
}

impl TryFrom<CreateCandidateRequest> for NewCandidate {
    type Error = Error;

    fn try_from(value: CreateCandidateRequest) -> Result<Self, Self::Error> {
        NewCandidate::try_from_parts(value.firstname, value.lastname, value.email, value.age)
            .map_err(candidate_validation_error)
    }
}

/// Distinguish an absent key (`None`) from an explicit `null` (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `PUT /v1/candidates/{id}`.
///
/// Absent keys are left unchanged. `lastname` and `age` accept `null` to
/// clear the stored value; `firstname` and `email` do not.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateCandidateRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "John")]
    pub firstname: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Doe")]
    pub lastname: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "john@example.com")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>, example = 31)]
    pub age: Option<Option<i32>>,
}

impl TryFrom<UpdateCandidateRequest> for CandidateUpdate {
    type Error = Error;

    fn try_from(value: UpdateCandidateRequest) -> Result<Self, Self::Error> {
        let firstname = match value.firstname {
            Some(None) => return Err(null_not_allowed_error(FieldName::new("firstname"))),
            Some(Some(name)) => Some(FirstName::new(name).map_err(candidate_validation_error)?),
            None => None,
        };
        let email = match value.email {
            Some(None) => return Err(null_not_allowed_error(FieldName::new("email"))),
            Some(Some(email)) => Some(Email::new(email).map_err(candidate_validation_error)?),
            None => None,
        };
        let lastname = value
            .lastname
            .map(|name| name.map(LastName::new).transpose())
            .transpose()
            .map_err(candidate_validation_error)?;
        let age = value
            .age
            .map(|age| age.map(Age::new).transpose())
            .transpose()
            .map_err(candidate_validation_error)?;

        Ok(CandidateUpdate {
            firstname,
            lastname,
            email,
            age,
        })
    }
}

/// Confirmation returned by update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Candidate 1 updated successfully")]
    pub message: String,
}

/// Query parameters accepted by `GET /v1/candidates`.
///
/// Filters are exact matches combined with AND. Keys outside this list are
/// rejected.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCandidatesParams {
    /// 1-indexed page number. Defaults to 1.
    pub page: Option<u32>,
    /// Page size. Defaults to 10, capped at 100.
    pub per_page: Option<u32>,
    pub id: Option<i32>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
}

/// Create a candidate.
#[utoipa::path(
    post,
    path = "/v1/candidates",
    request_body = CreateCandidateRequest,
    responses(
        (status = 201, description = "Candidate created", body = Candidate),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Storage fault", body = Error)
    ),
    tags = ["candidates"],
    operation_id = "createCandidate"
)]
#[post("/candidates")]
pub async fn create_candidate(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCandidateRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NewCandidate::try_from(payload.into_inner())?;
    let created = state.candidates.create(draft).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List candidates one page at a time, ordered by id.
#[utoipa::path(
    get,
    path = "/v1/candidates",
    params(ListCandidatesParams),
    responses(
        (status = 200, description = "Page of candidates", body = [Candidate]),
        (status = 400, description = "Invalid query", body = Error),
        (status = 500, description = "Storage fault", body = Error)
    ),
    tags = ["candidates"],
    operation_id = "listCandidates"
)]
#[get("/candidates")]
pub async fn list_candidates(
    state: web::Data<HttpState>,
    params: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<Vec<Candidate>>> {
    let query = parse_list_query(&params)?;
    let candidates = state.candidates_query.list(query).await?;
    Ok(web::Json(candidates))
}

/// Fetch one candidate.
#[utoipa::path(
    get,
    path = "/v1/candidates/{id}",
    params(("id" = i32, Path, description = "Candidate identifier")),
    responses(
        (status = 200, description = "Candidate", body = Candidate),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Unknown candidate", body = Error),
        (status = 500, description = "Storage fault", body = Error)
    ),
    tags = ["candidates"],
    operation_id = "getCandidate"
)]
#[get("/candidates/{id}")]
pub async fn get_candidate(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Candidate>> {
    let id = parse_candidate_id(path.into_inner())?;
    let candidate = state
        .candidates_query
        .get(id)
        .await?
        .ok_or_else(|| candidate_not_found(id))?;
    Ok(web::Json(candidate))
}

/// Change some fields of a candidate.
#[utoipa::path(
    put,
    path = "/v1/candidates/{id}",
    params(("id" = i32, Path, description = "Candidate identifier")),
    request_body = UpdateCandidateRequest,
    responses(
        (status = 200, description = "Candidate updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown candidate", body = Error),
        (status = 409, description = "Email already in use", body = Error),
        (status = 500, description = "Storage fault", body = Error)
    ),
    tags = ["candidates"],
    operation_id = "updateCandidate"
)]
#[put("/candidates/{id}")]
pub async fn update_candidate(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateCandidateRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_candidate_id(path.into_inner())?;
    let changes = CandidateUpdate::try_from(payload.into_inner())?;
    let candidate = state
        .candidates_query
        .get(id)
        .await?
        .ok_or_else(|| candidate_not_found(id))?;

    state.candidates.update(candidate, changes).await?;
    Ok(web::Json(MessageResponse {
        message: format!("Candidate {id} updated successfully"),
    }))
}

/// Remove a candidate.
#[utoipa::path(
    delete,
    path = "/v1/candidates/{id}",
    params(("id" = i32, Path, description = "Candidate identifier")),
    responses(
        (status = 200, description = "Candidate deleted", body = MessageResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Unknown candidate", body = Error),
        (status = 500, description = "Storage fault", body = Error)
    ),
    tags = ["candidates"],
    operation_id = "deleteCandidate"
)]
#[delete("/candidates/{id}")]
pub async fn delete_candidate(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_candidate_id(path.into_inner())?;
    let candidate = state
        .candidates_query
        .get(id)
        .await?
        .ok_or_else(|| candidate_not_found(id))?;

    state.candidates.delete(candidate).await?;
    Ok(web::Json(MessageResponse {
        message: format!("Candidate {id} deleted successfully"),
    }))
}

#[cfg(test)]
mod tests;
