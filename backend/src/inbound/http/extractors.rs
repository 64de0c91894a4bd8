//! Extractor configuration turning Actix parse failures into `invalid_request`
//! errors with the standard envelope instead of Actix's plain-text bodies.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::web;

use crate::domain::Error;

fn json_error(err: JsonPayloadError) -> Error {
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be JSON".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        other => format!("malformed JSON body: {other}"),
    };
    Error::invalid_request(message)
}

fn path_error(err: &PathError) -> Error {
    let PathError::Deserialize(inner) = err else {
        return Error::invalid_request("invalid path parameter");
    };
    Error::invalid_request(format!("invalid path parameter: {inner}"))
}

fn query_error(err: &QueryPayloadError) -> Error {
    Error::invalid_request(format!("invalid query string: {err}"))
}

/// JSON body configuration for the candidate API.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| json_error(err).into())
}

/// Path parameter configuration for the candidate API.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| path_error(&err).into())
}

/// Query string configuration for the candidate API.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| query_error(&err).into())
}
