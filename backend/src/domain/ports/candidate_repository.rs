//! Driven port for candidate storage.
use async_trait::async_trait;

use crate::domain::{
    Candidate, CandidateId, CandidateListQuery, CandidateUpdate, Email, NewCandidate,
};

use super::define_port_error;

define_port_error! {
    /// Failures raised by candidate storage adapters.
    pub enum CandidatePersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "candidate repository connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "candidate repository query failed: {message}",
        /// Another candidate already owns this email address.
        DuplicateEmail { email: String } => "candidate email already stored: {email}",
    }
}

/// Storage for candidate records.
///
/// Adapters assign identifiers and creation timestamps on insert and must
/// keep emails unique across all stored candidates, ignoring case, and report
/// collisions as [`CandidatePersistenceError::DuplicateEmail`]. Listing
/// returns candidates in ascending identifier order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Store a new candidate and return it with its assigned id and timestamp.
    async fn insert(&self, candidate: &NewCandidate) -> Result<Candidate, CandidatePersistenceError>;

    /// Fetch a candidate by identifier.
    async fn find_by_id(&self, id: CandidateId)
    -> Result<Option<Candidate>, CandidatePersistenceError>;

    /// Fetch the candidate owning `email`, compared without regard to case.
    async fn find_by_email(&self, email: &Email)
    -> Result<Option<Candidate>, CandidatePersistenceError>;

    /// Fetch one page of candidates matching every filter in `query`.
    async fn list(
        &self,
        query: &CandidateListQuery,
    ) -> Result<Vec<Candidate>, CandidatePersistenceError>;

    /// Apply `changes` to the stored candidate. `None` when it no longer exists.
    async fn update(
        &self,
        id: CandidateId,
        changes: &CandidateUpdate,
    ) -> Result<Option<Candidate>, CandidatePersistenceError>;

    /// Remove a candidate. `false` when nothing was removed.
    async fn delete(&self, id: CandidateId) -> Result<bool, CandidatePersistenceError>;
}
