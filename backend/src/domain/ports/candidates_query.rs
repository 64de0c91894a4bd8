//! Driving port for candidate reads.
use async_trait::async_trait;

use crate::domain::{Candidate, CandidateId, CandidateListQuery, Error};

/// Read access to candidates.
#[async_trait]
pub trait CandidatesQuery: Send + Sync {
    /// Fetch one candidate. `Ok(None)` when it does not exist.
    async fn get(&self, id: CandidateId) -> Result<Option<Candidate>, Error>;

    /// Fetch one page of candidates matching the query filters.
    async fn list(&self, query: CandidateListQuery) -> Result<Vec<Candidate>, Error>;
}
