//! Server-rendered candidate pages.
//!
//! Pages are plain HTML strings; every interpolated value passes through
//! [`escape_html`]. Mutations answer with `303 See Other` back to the list
//! and leave a flash message in the session.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError, get, post, web};
use tracing::warn;

use crate::domain::{Candidate, CandidateId, Error};
use crate::inbound::http::session::{FlashMessage, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_candidate_id, parse_list_query};

const LIST_PATH: &str = "/candidates";
const NOT_FOUND_FLASH: &str = "Candidate not found";
const DELETED_FLASH: &str = "Candidate deleted successfully";

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(title: &str, flash: Option<&FlashMessage>, body: &str) -> String {
    let flash = flash.map_or_else(String::new, |message| {
        format!(
            "<p class=\"flash flash-{}\">{}</p>\n",
            message.level.as_str(),
            escape_html(&message.text)
        )
    });
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{flash}{body}</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn optional_cell(value: Option<String>) -> String {
    value.map_or_else(String::new, |v| escape_html(&v))
}

fn candidate_row(candidate: &Candidate) -> String {
    let id = candidate.id();
    format!(
        "<tr><td><a href=\"{}\">{id}</a></td><td>{}</td><td>{}</td>\
         <td>{}</td><td>{}</td><td>{}</td></tr>\n",
        detail_path(id),
        escape_html(candidate.firstname().as_str()),
        optional_cell(candidate.lastname().map(|name| name.as_str().to_owned())),
        escape_html(candidate.email().as_str()),
        optional_cell(candidate.age().map(|age| age.get().to_string())),
        candidate.created_at().to_rfc3339(),
    )
}

fn render_list(candidates: &[Candidate], flash: Option<&FlashMessage>) -> String {
    let body = if candidates.is_empty() {
        "<p>No candidates found.</p>\n".to_owned()
    } else {
        let rows: String = candidates.iter().map(candidate_row).collect();
        format!(
            "<table>\n<thead><tr><th>ID</th><th>First name</th><th>Last name</th>\
             <th>Email</th><th>Age</th><th>Created</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n"
        )
    };
    layout("Candidates", flash, &body)
}

fn render_detail(candidate: &Candidate, flash: Option<&FlashMessage>) -> String {
    let id = candidate.id();
    let body = format!(
        "<dl>\n<dt>ID</dt><dd>{id}</dd>\n<dt>First name</dt><dd>{}</dd>\n\
         <dt>Last name</dt><dd>{}</dd>\n<dt>Email</dt><dd>{}</dd>\n\
         <dt>Age</dt><dd>{}</dd>\n<dt>Created</dt><dd>{}</dd>\n</dl>\n\
         <form method=\"post\" action=\"{detail}/delete\">\
         <button type=\"submit\">Delete</button></form>\n\
         <p><a href=\"{LIST_PATH}\">Back to candidates</a></p>\n",
        escape_html(candidate.firstname().as_str()),
        optional_cell(candidate.lastname().map(|name| name.as_str().to_owned())),
        escape_html(candidate.email().as_str()),
        optional_cell(candidate.age().map(|age| age.get().to_string())),
        candidate.created_at().to_rfc3339(),
        detail = detail_path(id),
    );
    layout("Candidate", flash, &body)
}

fn html(status: StatusCode, page: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(page)
}

fn error_page(error: &Error) -> HttpResponse {
    let flash = FlashMessage::error(error.message());
    html(error.status_code(), layout("Candidates", Some(&flash), ""))
}

fn redirect_to_list(session: &SessionContext, message: &FlashMessage) -> HttpResponse {
    if let Err(error) = session.flash(message) {
        warn!(error = %error.message(), "flash message not stored");
    }
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LIST_PATH))
        .finish()
}

async fn lookup(state: &HttpState, raw: i32) -> Result<Option<Candidate>, Error> {
    let Ok(id) = parse_candidate_id(raw) else {
        return Ok(None);
    };
    state.candidates_query.get(id).await
}

/// `GET /candidates`: one page of candidates as a table.
#[get("")]
pub async fn list_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    let flash = session.take_flash();
    let listed = match parse_list_query(&params) {
        Ok(query) => state.candidates_query.list(query).await,
        Err(error) => Err(error),
    };
    match listed {
        Ok(candidates) => html(
            StatusCode::OK,
            render_list(&candidates, flash.as_ref()),
        ),
        Err(error) => error_page(&error),
    }
}

/// `GET /candidates/{id}`: one candidate, or back to the list when unknown.
#[get("/{id}")]
pub async fn detail_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> HttpResponse {
    match lookup(&state, path.into_inner()).await {
        Ok(Some(candidate)) => {
            let flash = session.take_flash();
            html(
                StatusCode::OK,
                render_detail(&candidate, flash.as_ref()),
            )
        }
        Ok(None) => redirect_to_list(&session, &FlashMessage::error(NOT_FOUND_FLASH)),
        Err(error) => error_page(&error),
    }
}

/// `POST /candidates/{id}/delete`: remove and redirect to the list.
#[post("/{id}/delete")]
pub async fn delete_action(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> HttpResponse {
    let outcome = match lookup(&state, path.into_inner()).await {
        Ok(Some(candidate)) => match state.candidates.delete(candidate).await {
            Ok(()) => FlashMessage::success(DELETED_FLASH),
            Err(error) => FlashMessage::error(error.message()),
        },
        Ok(None) => FlashMessage::error(NOT_FOUND_FLASH),
        Err(error) => FlashMessage::error(error.message()),
    };
    redirect_to_list(&session, &outcome)
}

/// Location of a candidate's detail page.
pub fn detail_path(id: CandidateId) -> String {
    format!("{LIST_PATH}/{id}")
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
