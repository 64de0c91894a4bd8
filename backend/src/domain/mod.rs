//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed candidate entities used by the HTTP and
//! persistence adapters, and the service that enforces candidate rules.
//! Types are immutable once validated; each documents its invariants and
//! serialisation contract in its Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Candidate and its field newtypes: validated candidate records.
//! - CandidateListQuery / CandidateFilter: listing criteria.
//! - CandidateService: implements the candidate driving ports.

pub mod candidate;
pub mod candidate_query;
pub mod candidate_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::candidate::{
    AGE_MAX, AGE_MIN, Age, Candidate, CandidateDto, CandidateId, CandidateUpdate,
    CandidateValidationError, EMAIL_MAX, Email, FirstName, LastName, NAME_MAX, NewCandidate,
};
pub use self::candidate_query::{
    CandidateField, CandidateFilter, CandidateFilterError, CandidateListQuery,
};
pub use self::candidate_service::{CandidateService, candidate_not_found};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use candidates::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::conflict("taken"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
