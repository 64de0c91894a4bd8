//! Tests for the candidate service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockCandidateRepository;
use crate::domain::{Age, ErrorCode};
use chrono::Utc;
use rstest::{fixture, rstest};

fn make_service(repo: MockCandidateRepository) -> CandidateService<MockCandidateRepository> {
    CandidateService::new(Arc::new(repo))
}

fn stored(id: i32, email: &str) -> Candidate {
    let fields = NewCandidate::try_from_parts("John", Some("Doe"), email, Some(30))
        .expect("fixture fields are valid");
    Candidate::new(CandidateId::new(id).expect("positive id"), fields, Utc::now())
}

#[fixture]
fn john_draft() -> NewCandidate {
    NewCandidate::try_from_parts("John", Some("Doe"), "john@example.com", Some(30))
        .expect("fixture fields are valid")
}

#[rstest]
#[tokio::test]
async fn create_inserts_when_email_is_free(john_draft: NewCandidate) {
    let mut repo = MockCandidateRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Ok(stored(1, "john@example.com")));

    let created = make_service(repo)
        .create(john_draft)
        .await
        .expect("create succeeds");
    assert_eq!(created.id().as_i32(), 1);
}

#[rstest]
#[tokio::test]
async fn create_rejects_existing_email_without_inserting(john_draft: NewCandidate) {
    let mut repo = MockCandidateRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(stored(7, "john@example.com"))));
    repo.expect_insert().times(0);

    let error = make_service(repo)
        .create(john_draft)
        .await
        .expect_err("duplicate email");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Candidate with this email already exists.");
}

#[rstest]
#[tokio::test]
async fn create_maps_raced_unique_violation_to_conflict(john_draft: NewCandidate) {
    let mut repo = MockCandidateRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(CandidatePersistenceError::duplicate_email("john@example.com")));

    let error = make_service(repo)
        .create(john_draft)
        .await
        .expect_err("raced duplicate");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(CandidatePersistenceError::connection("pool exhausted"))]
#[case(CandidatePersistenceError::query("syntax error at or near"))]
#[tokio::test]
async fn create_hides_storage_fault_details(
    john_draft: NewCandidate,
    #[case] fault: CandidatePersistenceError,
) {
    let mut repo = MockCandidateRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert().times(1).return_once(move |_| Err(fault));

    let error = make_service(repo)
        .create(john_draft)
        .await
        .expect_err("storage fault");
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(
        error.message(),
        "Error creating candidate. Please try again later."
    );
    assert!(error.details().is_none());
}

#[rstest]
#[tokio::test]
async fn get_returns_none_for_missing_candidate() {
    let mut repo = MockCandidateRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let id = CandidateId::new(9).expect("positive id");
    let found = make_service(repo).get(id).await.expect("lookup succeeds");
    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn list_maps_storage_faults_to_generic_message() {
    let mut repo = MockCandidateRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|_| Err(CandidatePersistenceError::connection("refused")));

    let error = make_service(repo)
        .list(CandidateListQuery::default())
        .await
        .expect_err("storage fault");
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(
        error.message(),
        "Error retrieving candidates. Please try again later."
    );
}

#[rstest]
#[tokio::test]
async fn update_rejects_empty_changes() {
    let mut repo = MockCandidateRepository::new();
    repo.expect_update().times(0);

    let error = make_service(repo)
        .update(stored(1, "john@example.com"), CandidateUpdate::default())
        .await
        .expect_err("empty update");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_passes_only_supplied_fields() {
    let mut repo = MockCandidateRepository::new();
    repo.expect_find_by_email().times(0);
    repo.expect_update()
        .withf(|id, changes| {
            id.as_i32() == 1
                && changes.age == Some(Age::new(31).ok())
                && changes.firstname.is_none()
                && changes.lastname.is_none()
                && changes.email.is_none()
        })
        .times(1)
        .return_once(|_, changes| Ok(Some(stored(1, "john@example.com").with_changes(changes))));

    let changes = CandidateUpdate {
        age: Some(Some(Age::new(31).expect("valid age"))),
        ..CandidateUpdate::default()
    };
    let updated = make_service(repo)
        .update(stored(1, "john@example.com"), changes)
        .await
        .expect("update succeeds");
    assert_eq!(updated.age().map(Age::get), Some(31));
    assert_eq!(updated.email().as_str(), "john@example.com");
}

#[rstest]
#[tokio::test]
async fn update_rejects_email_owned_by_someone_else() {
    let mut repo = MockCandidateRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(stored(2, "jane@example.com"))));
    repo.expect_update().times(0);

    let changes = CandidateUpdate {
        email: Some(Email::new("jane@example.com").expect("valid email")),
        ..CandidateUpdate::default()
    };
    let error = make_service(repo)
        .update(stored(1, "john@example.com"), changes)
        .await
        .expect_err("email taken");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn update_reports_vanished_candidate_as_not_found() {
    let mut repo = MockCandidateRepository::new();
    repo.expect_update().times(1).return_once(|_, _| Ok(None));

    let changes = CandidateUpdate {
        age: Some(None),
        ..CandidateUpdate::default()
    };
    let error = make_service(repo)
        .update(stored(3, "john@example.com"), changes)
        .await
        .expect_err("row vanished");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Candidate with ID 3 not found");
}

#[rstest]
#[tokio::test]
async fn delete_reports_vanished_candidate_as_not_found() {
    let mut repo = MockCandidateRepository::new();
    repo.expect_delete().times(1).return_once(|_| Ok(false));

    let error = make_service(repo)
        .delete(stored(4, "john@example.com"))
        .await
        .expect_err("row vanished");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_hides_storage_fault_details() {
    let mut repo = MockCandidateRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(|_| Err(CandidatePersistenceError::query("deadlock detected")));

    let error = make_service(repo)
        .delete(stored(4, "john@example.com"))
        .await
        .expect_err("storage fault");
    assert_eq!(
        error.message(),
        "Error deleting candidate. Please try again later."
    );
}
