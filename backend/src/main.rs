//! Candidate service entry-point: loads settings, prepares PostgreSQL, and
//! serves the JSON API, HTML pages, probes, and (debug only) Swagger UI.

mod server;

use std::io;

use actix_web::cookie::Key;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use candidates::inbound::http::health::HealthState;
use candidates::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use candidates::settings::AppSettings;
use server::{ServerConfig, create_server};

fn session_key(settings: &AppSettings) -> io::Result<Key> {
    match settings.session_key_bytes() {
        Ok(Some(bytes)) => Ok(Key::derive_from(bytes)),
        Ok(None) => {
            warn!("SECRET_KEY not set; using a temporary session key");
            Ok(Key::generate())
        }
        Err(err) => Err(io::Error::other(err.to_string())),
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| io::Error::other(format!("invalid configuration: {err}")))?;
    info!(settings = ?settings, "configuration loaded");

    let key = session_key(&settings)?;
    let database_url = settings
        .database_url()
        .map_err(|err| io::Error::other(err.to_string()))?;

    run_pending_migrations(&database_url)
        .await
        .map_err(|err| io::Error::other(err.to_string()))?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.database_max_connections()),
    )
    .await
    .map_err(|err| io::Error::other(err.to_string()))?;

    let (host, port) = settings.bind_addr();
    let config =
        ServerConfig::new(key, settings.cookie_secure(), host, port).with_db_pool(pool);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(host, port, "listening");
    let result = server.await;
    health_state.mark_draining();
    result
}
