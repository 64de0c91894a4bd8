//! Embedded schema migrations applied at startup.
//!
//! `diesel_migrations` drives a synchronous connection, so the run happens on
//! Tokio's blocking pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::define_port_error;

/// Migrations compiled in from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

define_port_error! {
    /// Failures raised while applying migrations.
    pub enum MigrationError {
        /// The migration connection could not be opened.
        Connection { message: String } => "migration connection failed: {message}",
        /// A migration failed to apply.
        Apply { message: String } => "migration failed: {message}",
        /// The blocking task panicked or was cancelled.
        Task { message: String } => "migration task failed: {message}",
    }
}

/// Apply every pending migration against `database_url`.
///
/// Returns the number of migrations applied.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)
            .map_err(|err| MigrationError::connection(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| MigrationError::apply(err.to_string()))
    })
    .await
    .map_err(|err| MigrationError::task(err.to_string()))??;

    info!(applied, "database migrations complete");
    Ok(applied)
}
