//! OpenAPI document for the candidate service.
//!
//! Served through Swagger UI in debug builds and printed by the
//! `openapi-dump` binary for external tooling.

use utoipa::OpenApi;

use crate::domain::{Candidate, Error, ErrorCode};
use crate::inbound::http::candidates::{
    CreateCandidateRequest, MessageResponse, UpdateCandidateRequest,
};
use crate::inbound::http::health::ProbeStatus;

/// OpenAPI description of the JSON API and health probes.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Candidates API",
        description = "Create, read, update and delete candidate records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::candidates::create_candidate,
        crate::inbound::http::candidates::list_candidates,
        crate::inbound::http::candidates::get_candidate,
        crate::inbound::http::candidates::update_candidate,
        crate::inbound::http::candidates::delete_candidate,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Candidate,
        CreateCandidateRequest,
        UpdateCandidateRequest,
        MessageResponse,
        Error,
        ErrorCode,
        ProbeStatus
    )),
    tags(
        (name = "candidates", description = "Candidate records"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
