//! Driving port for candidate mutations.
use async_trait::async_trait;

use crate::domain::{Candidate, CandidateUpdate, Error, NewCandidate};

/// Create, modify, and remove candidates.
///
/// Callers look a candidate up through [`super::CandidatesQuery`] before
/// updating or deleting it, so a missing record is reported as not found
/// before any mutation is attempted.
#[async_trait]
pub trait CandidatesCommand: Send + Sync {
    /// Store a new candidate, rejecting an email that is already in use.
    async fn create(&self, candidate: NewCandidate) -> Result<Candidate, Error>;

    /// Apply `changes` to an existing candidate.
    async fn update(&self, candidate: Candidate, changes: CandidateUpdate)
    -> Result<Candidate, Error>;

    /// Remove an existing candidate.
    async fn delete(&self, candidate: Candidate) -> Result<(), Error>;
}
