//! HTTP server configuration object.

use actix_web::cookie::{Key, SameSite};
use candidates::outbound::persistence::DbPool;

/// Everything `create_server` needs besides the health flags.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, host: impl Into<String>, port: u16) -> Self {
        Self {
            key,
            cookie_secure,
            same_site: SameSite::Lax,
            host: host.into(),
            port,
            db_pool: None,
        }
    }

    /// Back the candidate ports with PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
