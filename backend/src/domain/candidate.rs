//! Candidate records.
//!
//! A candidate is a person with a name, an email address unique across all
//! candidates, and an optional age. Field newtypes validate their input once
//! at construction so the rest of the domain can rely on the invariants.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum number of characters in a first or last name.
pub const NAME_MAX: usize = 100;
/// Maximum number of characters in an email address.
pub const EMAIL_MAX: usize = 80;
/// Lowest accepted age.
pub const AGE_MIN: i32 = 0;
/// Highest accepted age.
pub const AGE_MAX: i32 = 150;

/// Validation failures raised while building candidate values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CandidateValidationError {
    #[error("candidate id must be a positive integer")]
    InvalidId,
    #[error("firstname must not be empty")]
    EmptyFirstName,
    #[error("firstname must be at most {max} characters")]
    FirstNameTooLong { max: usize },
    #[error("lastname must be at most {max} characters")]
    LastNameTooLong { max: usize },
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("email must look like local@domain")]
    InvalidEmail,
    #[error("age must be between {min} and {max}")]
    AgeOutOfRange { min: i32, max: i32 },
}

impl CandidateValidationError {
    /// Name of the offending field as it appears on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyFirstName | Self::FirstNameTooLong { .. } => "firstname",
            Self::LastNameTooLong { .. } => "lastname",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
            Self::AgeOutOfRange { .. } => "age",
        }
    }

    /// Machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyFirstName | Self::EmptyEmail => "empty",
            Self::FirstNameTooLong { .. }
            | Self::LastNameTooLong { .. }
            | Self::EmailTooLong { .. } => "too_long",
            Self::InvalidEmail => "invalid_format",
            Self::AgeOutOfRange { .. } => "out_of_range",
        }
    }
}

/// Store-assigned candidate identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct CandidateId(i32);

impl CandidateId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i32) -> Result<Self, CandidateValidationError> {
        if raw < 1 {
            return Err(CandidateValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Raw integer value.
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for CandidateId {
    type Error = CandidateValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CandidateId> for i32 {
    fn from(value: CandidateId) -> Self {
        value.0
    }
}

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Borrow the validated value.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_newtype!(
    /// Non-empty first name of at most [`NAME_MAX`] characters.
    FirstName
);
string_newtype!(
    /// Last name of at most [`NAME_MAX`] characters.
    LastName
);
string_newtype!(
    /// Email address of at most [`EMAIL_MAX`] characters shaped like `local@domain`.
    Email
);

impl FirstName {
    /// Validate a first name.
    pub fn new(value: impl Into<String>) -> Result<Self, CandidateValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CandidateValidationError::EmptyFirstName);
        }
        if value.chars().count() > NAME_MAX {
            return Err(CandidateValidationError::FirstNameTooLong { max: NAME_MAX });
        }
        Ok(Self(value))
    }
}

impl LastName {
    /// Validate a last name.
    pub fn new(value: impl Into<String>) -> Result<Self, CandidateValidationError> {
        let value = value.into();
        if value.chars().count() > NAME_MAX {
            return Err(CandidateValidationError::LastNameTooLong { max: NAME_MAX });
        }
        Ok(Self(value))
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only; deliverability is not our concern.
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate an email address.
    pub fn new(value: impl Into<String>) -> Result<Self, CandidateValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CandidateValidationError::EmptyEmail);
        }
        if value.chars().count() > EMAIL_MAX {
            return Err(CandidateValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&value) {
            return Err(CandidateValidationError::InvalidEmail);
        }
        Ok(Self(value))
    }
}

/// Age in whole years within [`AGE_MIN`]..=[`AGE_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(i32);

impl Age {
    /// Validate an age.
    pub fn new(value: i32) -> Result<Self, CandidateValidationError> {
        if !(AGE_MIN..=AGE_MAX).contains(&value) {
            return Err(CandidateValidationError::AgeOutOfRange {
                min: AGE_MIN,
                max: AGE_MAX,
            });
        }
        Ok(Self(value))
    }

    /// Raw value in years.
    pub fn get(self) -> i32 {
        self.0
    }
}

/// Validated fields for a candidate that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    firstname: FirstName,
    lastname: Option<LastName>,
    email: Email,
    age: Option<Age>,
}

impl NewCandidate {
    /// Assemble a new candidate from validated parts.
    pub fn new(
        firstname: FirstName,
        lastname: Option<LastName>,
        email: Email,
        age: Option<Age>,
    ) -> Self {
        Self {
            firstname,
            lastname,
            email,
            age,
        }
    }

    /// Validate raw values and assemble a new candidate.
    ///
    /// # Examples
    /// ```
    /// use candidates::domain::NewCandidate;
    ///
    /// let draft = NewCandidate::try_from_parts("John", Some("Doe"), "john@example.com", Some(30))
    ///     .expect("valid candidate");
    /// assert_eq!(draft.email().as_str(), "john@example.com");
    /// ```
    pub fn try_from_parts(
        firstname: impl Into<String>,
        lastname: Option<impl Into<String>>,
        email: impl Into<String>,
        age: Option<i32>,
    ) -> Result<Self, CandidateValidationError> {
        Ok(Self {
            firstname: FirstName::new(firstname)?,
            lastname: lastname.map(LastName::new).transpose()?,
            email: Email::new(email)?,
            age: age.map(Age::new).transpose()?,
        })
    }

    pub fn firstname(&self) -> &FirstName {
        &self.firstname
    }

    pub fn lastname(&self) -> Option<&LastName> {
        self.lastname.as_ref()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn age(&self) -> Option<Age> {
        self.age
    }
}

/// A stored candidate.
///
/// Serialises with snake_case keys, `null` for absent optional fields, and an
/// RFC 3339 `created_at`:
///
/// ```json
/// {"id": 1, "firstname": "John", "lastname": "Doe",
///  "email": "john@example.com", "age": 30,
///  "created_at": "2024-05-01T12:00:00Z"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(into = "CandidateDto")]
pub struct Candidate {
    #[schema(value_type = i32, example = 1)]
    id: CandidateId,
    #[schema(value_type = String, example = "John")]
    firstname: FirstName,
    #[schema(value_type = Option<String>, example = "Doe")]
    lastname: Option<LastName>,
    #[schema(value_type = String, example = "john@example.com")]
    email: Email,
    #[schema(value_type = Option<i32>, example = 30)]
    age: Option<Age>,
    created_at: DateTime<Utc>,
}

impl Candidate {
    /// Combine a stored identifier and timestamp with validated fields.
    pub fn new(id: CandidateId, fields: NewCandidate, created_at: DateTime<Utc>) -> Self {
        let NewCandidate {
            firstname,
            lastname,
            email,
            age,
        } = fields;
        Self {
            id,
            firstname,
            lastname,
            email,
            age,
            created_at,
        }
    }

    pub fn id(&self) -> CandidateId {
        self.id
    }

    pub fn firstname(&self) -> &FirstName {
        &self.firstname
    }

    pub fn lastname(&self) -> Option<&LastName> {
        self.lastname.as_ref()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn age(&self) -> Option<Age> {
        self.age
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this candidate with `changes` applied.
    ///
    /// The identifier and creation timestamp never change.
    #[must_use]
    pub fn with_changes(&self, changes: &CandidateUpdate) -> Self {
        let mut updated = self.clone();
        if let Some(firstname) = &changes.firstname {
            updated.firstname = firstname.clone();
        }
        if let Some(lastname) = &changes.lastname {
            updated.lastname = lastname.clone();
        }
        if let Some(email) = &changes.email {
            updated.email = email.clone();
        }
        if let Some(age) = changes.age {
            updated.age = age;
        }
        updated
    }
}

/// Partial modification of a stored candidate.
///
/// `None` leaves a field untouched. For the optional fields, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateUpdate {
    pub firstname: Option<FirstName>,
    pub lastname: Option<Option<LastName>>,
    pub email: Option<Email>,
    pub age: Option<Option<Age>>,
}

impl CandidateUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.email.is_none()
            && self.age.is_none()
    }
}

/// Wire representation of [`Candidate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDto {
    pub id: i32,
    pub firstname: String,
    pub lastname: Option<String>,
    pub email: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Candidate> for CandidateDto {
    fn from(value: Candidate) -> Self {
        Self {
            id: value.id.as_i32(),
            firstname: value.firstname.into(),
            lastname: value.lastname.map(String::from),
            email: value.email.into(),
            age: value.age.map(Age::get),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<CandidateDto> for Candidate {
    type Error = CandidateValidationError;

    fn try_from(value: CandidateDto) -> Result<Self, Self::Error> {
        let CandidateDto {
            id,
            firstname,
            lastname,
            email,
            age,
            created_at,
        } = value;
        let fields = NewCandidate::try_from_parts(firstname, lastname, email, age)?;
        Ok(Self::new(CandidateId::new(id)?, fields, created_at))
    }
}

impl<'de> Deserialize<'de> for Candidate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let dto = CandidateDto::deserialize(deserializer)?;
        Self::try_from(dto).map_err(serde::de::Error::custom)
    }
}
