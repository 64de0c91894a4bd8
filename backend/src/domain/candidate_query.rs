//! Listing criteria for candidates: exact-match filters plus a page selection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pagination::PageRequest;

use super::candidate::{Candidate, CandidateId};

/// Candidate attributes that may be used as equality filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateField {
    Id,
    FirstName,
    LastName,
    Email,
    Age,
    CreatedAt,
}

impl CandidateField {
    /// Every filterable field in column order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Age,
        Self::CreatedAt,
    ];

    /// Name used on the wire and in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstname",
            Self::LastName => "lastname",
            Self::Email => "email",
            Self::Age => "age",
            Self::CreatedAt => "created_at",
        }
    }

    fn expected_format(self) -> &'static str {
        match self {
            Self::Id => "a positive integer",
            Self::Age => "an integer",
            Self::CreatedAt => "an RFC 3339 timestamp",
            Self::FirstName | Self::LastName | Self::Email => "text",
        }
    }
}

impl fmt::Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateField {
    type Err = CandidateFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CandidateFilterError::UnknownField {
                field: s.to_owned(),
            })
    }
}

/// Problems found while parsing a filter from raw text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CandidateFilterError {
    #[error("unknown filter field `{field}`")]
    UnknownField { field: String },
    #[error("filter `{field}` expects {expected}")]
    InvalidValue {
        field: CandidateField,
        value: String,
        expected: &'static str,
    },
}

/// A single equality filter with a value typed to its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFilter {
    Id(CandidateId),
    FirstName(String),
    LastName(String),
    Email(String),
    Age(i32),
    CreatedAt(DateTime<Utc>),
}

impl CandidateFilter {
    /// Parse `key=value` into a typed filter.
    ///
    /// # Examples
    /// ```
    /// use candidates::domain::CandidateFilter;
    ///
    /// let filter = CandidateFilter::parse("age", "30").expect("age parses");
    /// assert_eq!(filter, CandidateFilter::Age(30));
    /// assert!(CandidateFilter::parse("shoe_size", "9").is_err());
    /// ```
    pub fn parse(key: &str, value: &str) -> Result<Self, CandidateFilterError> {
        let field: CandidateField = key.parse()?;
        let invalid = || CandidateFilterError::InvalidValue {
            field,
            value: value.to_owned(),
            expected: field.expected_format(),
        };
        Ok(match field {
            CandidateField::Id => {
                let raw: i32 = value.trim().parse().map_err(|_| invalid())?;
                Self::Id(CandidateId::new(raw).map_err(|_| invalid())?)
            }
            CandidateField::FirstName => Self::FirstName(value.to_owned()),
            CandidateField::LastName => Self::LastName(value.to_owned()),
            CandidateField::Email => Self::Email(value.to_owned()),
            CandidateField::Age => Self::Age(value.trim().parse().map_err(|_| invalid())?),
            CandidateField::CreatedAt => Self::CreatedAt(
                DateTime::parse_from_rfc3339(value.trim())
                    .map_err(|_| invalid())?
                    .with_timezone(&Utc),
            ),
        })
    }

    /// Field this filter constrains.
    pub fn field(&self) -> CandidateField {
        match self {
            Self::Id(_) => CandidateField::Id,
            Self::FirstName(_) => CandidateField::FirstName,
            Self::LastName(_) => CandidateField::LastName,
            Self::Email(_) => CandidateField::Email,
            Self::Age(_) => CandidateField::Age,
            Self::CreatedAt(_) => CandidateField::CreatedAt,
        }
    }

    /// Whether `candidate` satisfies this filter. Absent values never match.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        match self {
            Self::Id(id) => candidate.id() == *id,
            Self::FirstName(name) => candidate.firstname().as_str() == name,
            Self::LastName(name) => candidate
                .lastname()
                .is_some_and(|stored| stored.as_str() == name),
            Self::Email(email) => candidate.email().as_str() == email,
            Self::Age(age) => candidate.age().is_some_and(|stored| stored.get() == *age),
            Self::CreatedAt(at) => candidate.created_at() == *at,
        }
    }
}

/// A filtered, paginated listing request. Filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateListQuery {
    page: PageRequest,
    filters: Vec<CandidateFilter>,
}

impl CandidateListQuery {
    pub fn new(page: PageRequest, filters: Vec<CandidateFilter>) -> Self {
        Self { page, filters }
    }

    /// Add another filter.
    #[must_use]
    pub fn with_filter(mut self, filter: CandidateFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn filters(&self) -> &[CandidateFilter] {
        &self.filters
    }

    /// Whether `candidate` satisfies every filter.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.filters.iter().all(|filter| filter.matches(candidate))
    }
}
