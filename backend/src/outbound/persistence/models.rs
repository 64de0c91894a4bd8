//! Internal Diesel row structs for the `candidates` table.
//!
//! These never leave the persistence layer; repositories convert them to and
//! from domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Age, Candidate, CandidateDto, CandidateUpdate, CandidateValidationError, NewCandidate,
};

use super::schema::candidates;

/// Row read back from the `candidates` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = candidates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CandidateRow {
    pub id: i32,
    pub firstname: String,
    pub lastname: Option<String>,
    pub email: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = CandidateValidationError;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        Candidate::try_from(CandidateDto {
            id: row.id,
            firstname: row.firstname,
            lastname: row.lastname,
            email: row.email,
            age: row.age,
            created_at: row.created_at,
        })
    }
}

/// Insertable row; `id` and `created_at` are assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = candidates)]
pub(crate) struct NewCandidateRow<'a> {
    pub firstname: &'a str,
    pub lastname: Option<&'a str>,
    pub email: &'a str,
    pub age: Option<i32>,
}

impl<'a> From<&'a NewCandidate> for NewCandidateRow<'a> {
    fn from(candidate: &'a NewCandidate) -> Self {
        Self {
            firstname: candidate.firstname().as_str(),
            lastname: candidate.lastname().map(|name| name.as_str()),
            email: candidate.email().as_str(),
            age: candidate.age().map(Age::get),
        }
    }
}

/// Partial update. Outer `None` skips a column; `Some(None)` writes NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = candidates)]
pub(crate) struct CandidateChangeset<'a> {
    pub firstname: Option<&'a str>,
    pub lastname: Option<Option<&'a str>>,
    pub email: Option<&'a str>,
    pub age: Option<Option<i32>>,
}

impl<'a> From<&'a CandidateUpdate> for CandidateChangeset<'a> {
    fn from(changes: &'a CandidateUpdate) -> Self {
        Self {
            firstname: changes.firstname.as_ref().map(|name| name.as_str()),
            lastname: changes
                .lastname
                .as_ref()
                .map(|name| name.as_ref().map(|value| value.as_str())),
            email: changes.email.as_ref().map(|email| email.as_str()),
            age: changes.age.map(|age| age.map(Age::get)),
        }
    }
}
