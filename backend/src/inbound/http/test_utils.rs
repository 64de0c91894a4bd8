//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::CandidateService;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryCandidateRepository;

pub const SESSION_COOKIE: &str = "session";

/// Session middleware with a throwaway key and the `Secure` flag off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Handler state over a fresh in-memory store.
///
/// The repository is returned too so tests can seed it or inject faults.
pub fn memory_state() -> (HttpState, Arc<InMemoryCandidateRepository>) {
    let repository = Arc::new(InMemoryCandidateRepository::new());
    let service = CandidateService::new(repository.clone());
    (HttpState::from_service(Arc::new(service)), repository)
}
