//! HTTP inbound adapter: the JSON candidate API, HTML views, and probes.

pub mod candidates;
pub mod error;
pub mod extractors;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod views;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// JSON candidate API mounted under `/v1`.
///
/// Extractor failures are answered with the standard error envelope.
pub fn api_scope() -> Scope {
    web::scope("/v1")
        .app_data(extractors::json_config())
        .app_data(extractors::path_config())
        .app_data(extractors::query_config())
        .service(candidates::create_candidate)
        .service(candidates::list_candidates)
        .service(candidates::get_candidate)
        .service(candidates::update_candidate)
        .service(candidates::delete_candidate)
}

/// Server-rendered candidate pages mounted under `/candidates`.
///
/// The caller wraps this scope in a session middleware; flash messages are
/// stored in the session.
pub fn views_scope() -> Scope {
    web::scope("/candidates")
        .app_data(extractors::path_config())
        .app_data(extractors::query_config())
        .service(views::list_page)
        .service(views::detail_page)
        .service(views::delete_action)
}
