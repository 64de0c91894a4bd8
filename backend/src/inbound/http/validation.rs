//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose `details` name the
//! offending field and a stable reason code.

use std::collections::BTreeMap;

use pagination::{PageRequest, PageRequestError};
use serde_json::json;

use crate::domain::{
    CandidateFilter, CandidateFilterError, CandidateId, CandidateListQuery,
    CandidateValidationError, Error,
};

/// Reason codes for request-shape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReasonCode {
    InvalidInteger,
    NullNotAllowed,
    UnknownFilter,
    InvalidFilterValue,
    OutOfRange,
    DuplicateParameter,
}

impl ReasonCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInteger => "invalid_integer",
            Self::NullNotAllowed => "null_not_allowed",
            Self::UnknownFilter => "unknown_filter",
            Self::InvalidFilterValue => "invalid_filter_value",
            Self::OutOfRange => "out_of_range",
            Self::DuplicateParameter => "duplicate_parameter",
        }
    }
}

/// Newtype wrapper for wire field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

const PAGE: FieldName = FieldName::new("page");
const PER_PAGE: FieldName = FieldName::new("per_page");

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn field_value_error(field: &str, code: &str, value: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code,
    }))
}

/// Map a candidate value-object failure to a 400 payload.
pub(crate) fn candidate_validation_error(err: CandidateValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

/// Reject an explicit `null` for a field that cannot be cleared.
pub(crate) fn null_not_allowed_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ReasonCode::NullNotAllowed.as_str(),
        format!("{field} cannot be null"),
    )
}

/// Map a filter parse failure to a 400 payload.
pub(crate) fn filter_error(err: CandidateFilterError) -> Error {
    let message = err.to_string();
    match err {
        CandidateFilterError::UnknownField { field } => {
            field_error(&field, ReasonCode::UnknownFilter.as_str(), message)
        }
        CandidateFilterError::InvalidValue { field, value, .. } => field_value_error(
            field.as_str(),
            ReasonCode::InvalidFilterValue.as_str(),
            &value,
            message,
        ),
    }
}

fn page_error(err: PageRequestError) -> Error {
    let field = match err {
        PageRequestError::ZeroPage => PAGE,
        PageRequestError::ZeroPerPage => PER_PAGE,
    };
    field_error(field.as_str(), ReasonCode::OutOfRange.as_str(), err.to_string())
}

fn parse_page_number(field: FieldName, raw: Option<&str>) -> Result<Option<u32>, Error> {
    raw.map(|value| {
        value.trim().parse::<u32>().map_err(|_| {
            field_value_error(
                field.as_str(),
                ReasonCode::InvalidInteger.as_str(),
                value,
                format!("{} must be a non-negative integer", field.as_str()),
            )
        })
    })
    .transpose()
}

/// Index query-string pairs by key, rejecting a key given more than once.
fn unique_params(pairs: &[(String, String)]) -> Result<BTreeMap<&str, &str>, Error> {
    let mut params = BTreeMap::new();
    for (key, value) in pairs {
        if params.insert(key.as_str(), value.as_str()).is_some() {
            return Err(field_error(
                key,
                ReasonCode::DuplicateParameter.as_str(),
                format!("query parameter {key} may only be given once"),
            ));
        }
    }
    Ok(params)
}

/// Build a listing query from raw query-string pairs.
///
/// `page` and `per_page` select the page; every other key must name a
/// filterable candidate field. Each key may appear at most once.
pub(crate) fn parse_list_query(pairs: &[(String, String)]) -> Result<CandidateListQuery, Error> {
    let params = unique_params(pairs)?;
    let page = parse_page_number(PAGE, params.get(PAGE.as_str()).copied())?;
    let per_page = parse_page_number(PER_PAGE, params.get(PER_PAGE.as_str()).copied())?;
    let page = PageRequest::from_optional(page, per_page).map_err(page_error)?;

    let filters = params
        .iter()
        .filter(|(key, _)| **key != PAGE.as_str() && **key != PER_PAGE.as_str())
        .map(|(key, value)| CandidateFilter::parse(key, value).map_err(filter_error))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CandidateListQuery::new(page, filters))
}

/// Validate a raw path identifier.
pub(crate) fn parse_candidate_id(raw: i32) -> Result<CandidateId, Error> {
    CandidateId::new(raw).map_err(candidate_validation_error)
}
