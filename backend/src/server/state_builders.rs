//! Builds handler state from the configured storage.

use std::sync::Arc;

use tracing::warn;

use candidates::domain::CandidateService;
use candidates::inbound::http::state::HttpState;
use candidates::outbound::memory::InMemoryCandidateRepository;
use candidates::outbound::persistence::{DbPool, DieselCandidateRepository};

/// PostgreSQL-backed state when a pool is present, otherwise an in-memory
/// store that is lost on restart.
pub(crate) fn build_http_state(pool: Option<&DbPool>) -> HttpState {
    match pool {
        Some(pool) => {
            let repository = Arc::new(DieselCandidateRepository::new(pool.clone()));
            HttpState::from_service(Arc::new(CandidateService::new(repository)))
        }
        None => {
            warn!("no database pool configured; candidates are kept in memory");
            let repository = Arc::new(InMemoryCandidateRepository::new());
            HttpState::from_service(Arc::new(CandidateService::new(repository)))
        }
    }
}
