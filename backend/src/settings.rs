//! Application settings loaded via OrthoConfig.
//!
//! Values are layered from defaults, an optional config file, environment
//! variables (`HOST`, `DATABASE_USER`, ...) and command-line flags.

use std::fmt;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

pub const DEFAULT_DATABASE_PORT: u16 = 5432;
/// Minimum length of `SECRET_KEY` in bytes.
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// Problems found after the raw settings have loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("SECRET_KEY must be at least {MIN_SECRET_KEY_LEN} bytes, got {actual}")]
    SecretKeyTooShort { actual: usize },
    #[error("database settings do not form a valid URL: {message}")]
    InvalidDatabaseUrl { message: String },
}

/// Service configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
pub struct AppSettings {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    pub database_user: String,
    pub database_password: String,
    pub database_host: String,
    pub database_name: String,
    pub database_port: Option<u16>,
    /// Upper bound on pooled connections.
    pub database_max_connections: Option<u32>,
    /// Session signing and encryption material.
    pub secret_key: Option<String>,
    /// Send the session cookie with `Secure`.
    #[ortho_config(default = true)]
    pub session_cookie_secure: bool,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_user", &self.database_user)
            .field("database_password", &"<redacted>")
            .field("database_host", &self.database_host)
            .field("database_name", &self.database_name)
            .field("database_port", &self.database_port)
            .field("database_max_connections", &self.database_max_connections)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("session_cookie_secure", &self.session_cookie_secure)
            .finish()
    }
}

impl AppSettings {
    /// Socket address tuple for `HttpServer::bind`.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn database_port(&self) -> u16 {
        self.database_port.unwrap_or(DEFAULT_DATABASE_PORT)
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn cookie_secure(&self) -> bool {
        self.session_cookie_secure
    }

    /// PostgreSQL URL assembled from the parts; user and password are
    /// percent-encoded.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        let invalid = |message: String| SettingsError::InvalidDatabaseUrl { message };
        let mut url = Url::parse(&format!(
            "postgres://{}:{}/{}",
            self.database_host,
            self.database_port(),
            self.database_name
        ))
        .map_err(|err| invalid(err.to_string()))?;
        url.set_username(&self.database_user)
            .map_err(|()| invalid("username rejected".to_owned()))?;
        url.set_password(Some(&self.database_password))
            .map_err(|()| invalid("password rejected".to_owned()))?;
        Ok(url.into())
    }

    /// Validated session key bytes, or `None` when no key is configured.
    pub fn session_key_bytes(&self) -> Result<Option<&[u8]>, SettingsError> {
        let Some(secret) = self.secret_key.as_deref() else {
            return Ok(None);
        };
        let bytes = secret.as_bytes();
        if bytes.len() < MIN_SECRET_KEY_LEN {
            return Err(SettingsError::SecretKeyTooShort {
                actual: bytes.len(),
            });
        }
        Ok(Some(bytes))
    }
}
