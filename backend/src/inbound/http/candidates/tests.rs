//! Handler tests for the candidate API over the in-memory store.

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use crate::Trace;
use crate::domain::TRACE_ID_HEADER;
use crate::domain::ports::CandidatePersistenceError;
use crate::inbound::http::api_scope;
use crate::inbound::http::test_utils::memory_state;

macro_rules! api_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(Trace)
                .service(api_scope()),
        )
        .await
    };
}

fn john() -> Value {
    json!({
        "firstname": "John",
        "lastname": "Doe",
        "email": "john@example.com",
        "age": 30
    })
}

async fn send_json<S>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

#[actix_web::test]
async fn create_then_duplicate_conflicts() {
    let (state, _repository) = memory_state();
    let app = api_app!(state);

    let (status, created) = send_json(
        &app,
        test::TestRequest::post().uri("/v1/candidates").set_json(john()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["firstname"], "John");
    assert_eq!(created["lastname"], "Doe");
    assert!(created["created_at"].is_string());

    let (status, conflict) = send_json(
        &app,
        test::TestRequest::post().uri("/v1/candidates").set_json(john()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["code"], "conflict");
    assert_eq!(conflict["message"], "Candidate with this email already exists.");
    assert_eq!(conflict["details"]["field"], "email");
}

#[actix_web::test]
async fn dotless_domains_are_accepted_and_case_variants_conflict() {
    let (state, _repository) = memory_state();
    let app = api_app!(state);

    let (status, created) = send_json(
        &app,
        test::TestRequest::post()
            .uri("/v1/candidates")
            .set_json(json!({"firstname": "A", "email": "a@localhost"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "a@localhost");

    let (status, conflict) = send_json(
        &app,
        test::TestRequest::post()
            .uri("/v1/candidates")
            .set_json(json!({"firstname": "B", "email": "A@LocalHost"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["code"], "conflict");
}

#[rstest]
#[case(json!({"lastname": "Doe", "email": "a@example.com"}), "missing")]
#[case(json!({"firstname": "   ", "email": "a@example.com"}), "empty")]
#[case(json!({"firstname": "A", "email": "not-an-email"}), "invalid_format")]
#[case(json!({"firstname": "A", "email": "a@example.com", "age": 200}), "out_of_range")]
#[case(json!({"firstname": "A", "email": "a@example.com", "nickname": "x"}), "unknown")]
#[actix_web::test]
async fn invalid_bodies_are_rejected(#[case] body: Value, #[case] _reason: &str) {
    let (state, repository) = memory_state();
    let app = api_app!(state);

    let (status, error) = send_json(
        &app,
        test::TestRequest::post().uri("/v1/candidates").set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
    assert!(repository.is_empty());
}

#[actix_web::test]
async fn malformed_json_is_an_invalid_request() {
    let (state, _repository) = memory_state();
    let app = api_app!(state);

    let (status, error) = send_json(
        &app,
        test::TestRequest::post()
            .uri("/v1/candidates")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"firstname\": "),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
}

#[actix_web::test]
async fn age_only_update_keeps_other_fields() {
    let (state, _repository) = memory_state();
    let app = api_app!(state);
    send_json(
        &app,
        test::TestRequest::post().uri("/v1/candidates").set_json(john()),
    )
    .await;

    let (status, message) = send_json(
        &app,
        test::TestRequest::put()
            .uri("/v1/candidates/1")
            .set_json(json!({"age": 31})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message, json!({"message": "Candidate 1 updated successfully"}));

    let (_, fetched) = send_json(&app, test::TestRequest::get().uri("/v1/candidates/1")).await;
    assert_eq!(fetched["age"], 31);
    assert_eq!(fetched["firstname"], "John");
    assert_eq!(fetched["email"], "john@example.com");
}

#[rstest]
#[case(json!({"firstname": null}))]
#[case(json!({"email": null}))]
#[case(json!({}))]
#[actix_web::test]
async fn unusable_updates_are_rejected(#[case] body: Value) {
    let (state, _repository) = memory_state();
    let app = api_app!(state);
    send_json(
        &app,
        test::TestRequest::post().uri("/v1/candidates").set_json(john()),
    )
    .await;

    let (status, _) = send_json(
        &app,
        test::TestRequest::put().uri("/v1/candidates/1").set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn lastname_can_be_cleared() {
    let (state, _repository) = memory_state();
    let app = api_app!(state);
    send_json(
        &app,
        test::TestRequest::post().uri("/v1/candidates").set_json(john()),
    )
    .await;

    send_json(
        &app,
        test::TestRequest::put()
            .uri("/v1/candidates/1")
            .set_json(json!({"lastname": null})),
    )
    .await;
    let (_, fetched) = send_json(&app, test::TestRequest::get().uri("/v1/candidates/1")).await;
    assert_eq!(fetched["lastname"], Value::Null);
}

#[actix_web::test]
async fn deleted_candidate_is_gone() {
    let (state, _repository) = memory_state();
    let app = api_app!(state);
    send_json(
        &app,
        test::TestRequest::post().uri("/v1/candidates").set_json(john()),
    )
    .await;

    let (status, message) =
        send_json(&app, test::TestRequest::delete().uri("/v1/candidates/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["message"], "Candidate 1 deleted successfully");

    let (status, error) = send_json(&app, test::TestRequest::get().uri("/v1/candidates/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "Candidate with ID 1 not found");

    let (status, _) = send_json(&app, test::TestRequest::delete().uri("/v1/candidates/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/v1/candidates?page=1&per_page=2", 2)]
#[case("/v1/candidates?page=3&per_page=2", 1)]
#[case("/v1/candidates?page=4&per_page=2", 0)]
#[case("/v1/candidates", 5)]
#[case("/v1/candidates?age=33", 1)]
#[actix_web::test]
async fn lists_pages_and_filters(#[case] uri: &str, #[case] expected: usize) {
    let (state, _repository) = memory_state();
    let app = api_app!(state);
    for n in 0..5 {
        send_json(
            &app,
            test::TestRequest::post().uri("/v1/candidates").set_json(json!({
                "firstname": format!("Seed{n}"),
                "email": format!("seed{n}@example.com"),
                "age": 30 + n
            })),
        )
        .await;
    }

    let (status, listed) = send_json(&app, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(expected));
}

#[rstest]
#[case("/v1/candidates?password=x")]
#[case("/v1/candidates?age=abc")]
#[case("/v1/candidates?page=0")]
#[case("/v1/candidates?email=d@example.com&email=zzz@example.com")]
#[actix_web::test]
async fn bad_list_queries_are_rejected(#[case] uri: &str) {
    let (state, _repository) = memory_state();
    let app = api_app!(state);

    let (status, error) = send_json(&app, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
}

#[actix_web::test]
async fn storage_faults_are_generic_and_traced() {
    let (state, repository) = memory_state();
    repository.set_failure(Some(CandidatePersistenceError::connection(
        "password authentication failed for user \"candidates\"",
    )));
    let app = api_app!(state);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/v1/candidates").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "internal_error");
    assert_eq!(
        body["message"],
        "Error retrieving candidates. Please try again later."
    );
    assert_eq!(body["traceId"], header);
    assert!(body.get("details").is_none());
}

#[actix_web::test]
async fn non_numeric_ids_are_invalid_requests() {
    let (state, _repository) = memory_state();
    let app = api_app!(state);

    let (status, error) = send_json(&app, test::TestRequest::get().uri("/v1/candidates/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
}
