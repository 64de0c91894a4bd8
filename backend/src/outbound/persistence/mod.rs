//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both internal) and domain types. Connections come from a
//! `bb8` pool of `diesel-async` connections, and every database failure is
//! mapped to a typed port error.
//!
//! ```ignore
//! use candidates::outbound::persistence::{DbPool, DieselCandidateRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/candidates")).await?;
//! let repository = DieselCandidateRepository::new(pool);
//! ```

mod diesel_candidate_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_candidate_repository::DieselCandidateRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
