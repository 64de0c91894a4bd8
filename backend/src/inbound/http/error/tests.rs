//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error_case() -> Error {
    Error::internal("Error creating candidate. Please try again later.")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"sql": "INSERT INTO candidates"}))
}

#[fixture]
fn invalid_request_case() -> Error {
    Error::invalid_request("firstname must not be empty")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "firstname", "code": "empty"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn render(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_keep_message_but_drop_details(
    #[from(internal_error_case)] error: Error,
) {
    let (status, header, payload) = render(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(
        payload.message(),
        "Error creating candidate. Please try again later."
    );
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_details(#[from(invalid_request_case)] error: Error) {
    let (status, header, payload) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        payload.details(),
        Some(&json!({"field": "firstname", "code": "empty"}))
    );
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_id_omit_the_header() {
    let (status, header, payload) = render(Error::conflict("taken")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(header.is_none());
    assert!(payload.trace_id().is_none());
}

#[given("a conflict error code")]
fn a_conflict_error_code() -> ErrorCode {
    ErrorCode::Conflict
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_an_http_status(code: ErrorCode) -> StatusCode {
    super::status_for(code)
}

#[then("the status is 409 Conflict")]
fn the_status_is_409_conflict(status: StatusCode) {
    assert_eq!(status, StatusCode::CONFLICT);
}

#[test]
fn conflict_codes_map_to_409() {
    let code = a_conflict_error_code();
    let status = the_adapter_maps_the_code_to_an_http_status(code);
    the_status_is_409_conflict(status);
}

#[test]
fn actix_errors_are_promoted_to_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
