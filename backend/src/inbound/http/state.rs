//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised without I/O.

use std::sync::Arc;

use crate::domain::ports::{CandidatesCommand, CandidatesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub candidates: Arc<dyn CandidatesCommand>,
    pub candidates_query: Arc<dyn CandidatesQuery>,
}

impl HttpState {
    /// Bundle separate command and query implementations.
    pub fn new(
        candidates: Arc<dyn CandidatesCommand>,
        candidates_query: Arc<dyn CandidatesQuery>,
    ) -> Self {
        Self {
            candidates,
            candidates_query,
        }
    }

    /// Use one service for both ports.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use candidates::domain::CandidateService;
    /// use candidates::inbound::http::state::HttpState;
    /// use candidates::outbound::memory::InMemoryCandidateRepository;
    ///
    /// let service = CandidateService::new(Arc::new(InMemoryCandidateRepository::new()));
    /// let state = HttpState::from_service(Arc::new(service));
    /// # let _ = state;
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: CandidatesCommand + CandidatesQuery + 'static,
    {
        Self {
            candidates: service.clone(),
            candidates_query: service,
        }
    }
}
