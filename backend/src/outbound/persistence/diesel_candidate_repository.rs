//! PostgreSQL-backed `CandidateRepository` using Diesel.
//!
//! Every operation is a single statement. Case-insensitive email uniqueness is
//! enforced by the `candidates_email_key` index on `lower(email)` and reported as
//! [`CandidatePersistenceError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CandidatePersistenceError, CandidateRepository};
use crate::domain::{
    Candidate, CandidateFilter, CandidateId, CandidateListQuery, CandidateUpdate, Email,
    NewCandidate,
};

use super::models::{CandidateChangeset, CandidateRow, NewCandidateRow};
use super::pool::{DbPool, PoolError};
use super::schema::candidates;

const EMAIL_CONSTRAINT: &str = "candidates_email_key";

diesel::define_sql_function!(fn lower(value: Text) -> Text);

/// Diesel implementation of [`CandidateRepository`].
#[derive(Clone)]
pub struct DieselCandidateRepository {
    pool: DbPool,
}

impl DieselCandidateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CandidatePersistenceError {
    CandidatePersistenceError::connection(error.into_message())
}

/// Translate a Diesel failure. `email` names the address being written, if
/// any, so a unique violation can be reported against it.
fn map_diesel_error(error: DieselError, email: Option<&str>) -> CandidatePersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => debug!(
            ?kind,
            message = info.message(),
            constraint = info.constraint_name(),
            "diesel operation failed"
        ),
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(EMAIL_CONSTRAINT) =>
        {
            CandidatePersistenceError::duplicate_email(email.unwrap_or_default())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            CandidatePersistenceError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            CandidatePersistenceError::query(info.message().to_owned())
        }
        DieselError::QueryBuilderError(err) => {
            CandidatePersistenceError::query(format!("invalid query: {err}"))
        }
        other => CandidatePersistenceError::query(other.to_string()),
    }
}

fn row_to_candidate(row: CandidateRow) -> Result<Candidate, CandidatePersistenceError> {
    let id = row.id;
    Candidate::try_from(row).map_err(|err| {
        CandidatePersistenceError::query(format!("stored candidate {id} is invalid: {err}"))
    })
}

#[async_trait]
impl CandidateRepository for DieselCandidateRepository {
    async fn insert(
        &self,
        candidate: &NewCandidate,
    ) -> Result<Candidate, CandidatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let email = candidate.email().as_str();

        let row = diesel::insert_into(candidates::table)
            .values(NewCandidateRow::from(candidate))
            .returning(CandidateRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(email)))?;
        row_to_candidate(row)
    }

    async fn find_by_id(
        &self,
        id: CandidateId,
    ) -> Result<Option<Candidate>, CandidatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        candidates::table
            .find(id.as_i32())
            .select(CandidateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?
            .map(row_to_candidate)
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Candidate>, CandidatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        candidates::table
            .filter(lower(candidates::email).eq(lower(email.as_str())))
            .select(CandidateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?
            .map(row_to_candidate)
            .transpose()
    }

    async fn list(
        &self,
        query: &CandidateListQuery,
    ) -> Result<Vec<Candidate>, CandidatePersistenceError> {
        let page = query.page();
        let offset = i64::try_from(page.offset()).map_err(|_| {
            CandidatePersistenceError::query(format!("page {} is out of range", page.page()))
        })?;

        let mut statement = candidates::table
            .select(CandidateRow::as_select())
            .into_boxed();
        for filter in query.filters() {
            statement = match filter {
                CandidateFilter::Id(id) => statement.filter(candidates::id.eq(id.as_i32())),
                CandidateFilter::FirstName(name) => {
                    statement.filter(candidates::firstname.eq(name.clone()))
                }
                CandidateFilter::LastName(name) => {
                    statement.filter(candidates::lastname.eq(name.clone()))
                }
                CandidateFilter::Email(email) => {
                    statement.filter(candidates::email.eq(email.clone()))
                }
                CandidateFilter::Age(age) => statement.filter(candidates::age.eq(*age)),
                CandidateFilter::CreatedAt(at) => statement.filter(candidates::created_at.eq(*at)),
            };
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CandidateRow> = statement
            .order(candidates::id.asc())
            .limit(i64::from(page.limit()))
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows.into_iter().map(row_to_candidate).collect()
    }

    async fn update(
        &self,
        id: CandidateId,
        changes: &CandidateUpdate,
    ) -> Result<Option<Candidate>, CandidatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let email = changes.email.as_ref().map(Email::as_str);

        diesel::update(candidates::table.find(id.as_i32()))
            .set(CandidateChangeset::from(changes))
            .returning(CandidateRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, email))?
            .map(row_to_candidate)
            .transpose()
    }

    async fn delete(&self, id: CandidateId) -> Result<bool, CandidatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(candidates::table.find(id.as_i32()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(removed > 0)
    }
}
