//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (repositories) are implemented by outbound adapters. Driving
//! ports (commands and queries) are implemented by domain services and
//! consumed by inbound adapters. Each port exposes typed errors so adapters
//! map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod candidate_repository;
mod candidates_command;
mod candidates_query;

#[cfg(test)]
pub use candidate_repository::MockCandidateRepository;
pub use candidate_repository::{CandidatePersistenceError, CandidateRepository};
pub use candidates_command::CandidatesCommand;
pub use candidates_query::CandidatesQuery;
