//! Page-number pagination primitives shared by listing endpoints.
//!
//! Listing endpoints accept a 1-indexed `page` and a `per_page` size. This
//! crate validates both, clamps the page size to [`MAX_PER_PAGE`] so callers
//! cannot request unbounded scans, and exposes the derived `LIMIT`/`OFFSET`
//! pair used by persistence adapters.
//!
//! ```
//! use pagination::{PageRequest, MAX_PER_PAGE};
//!
//! let request = PageRequest::new(3, 2)?;
//! assert_eq!(request.offset(), 4);
//! assert_eq!(request.limit(), 2);
//!
//! let clamped = PageRequest::new(1, 10_000)?;
//! assert_eq!(clamped.per_page(), MAX_PER_PAGE);
//! # Ok::<(), pagination::PageRequestError>(())
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page served when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Upper bound applied to every page size.
pub const MAX_PER_PAGE: u32 = 100;

/// Validation failures raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are 1-indexed; zero is not a page.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one record.
    #[error("per_page must be at least 1")]
    ZeroPerPage,
}

/// Validated page selection.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= per_page <= MAX_PER_PAGE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageParams", into = "PageParams")]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Build a page request, clamping `per_page` to [`MAX_PER_PAGE`].
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPage`] or
    /// [`PageRequestError::ZeroPerPage`] when either value is zero.
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if per_page == 0 {
            return Err(PageRequestError::ZeroPerPage);
        }
        let bounded = if per_page > MAX_PER_PAGE {
            MAX_PER_PAGE
        } else {
            per_page
        };
        Ok(Self {
            page,
            per_page: bounded,
        })
    }

    /// Build a page request from optional inputs, applying the defaults.
    ///
    /// # Errors
    ///
    /// Propagates the validation failures of [`PageRequest::new`].
    pub const fn from_optional(
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Self, PageRequestError> {
        let selected_page = match page {
            Some(value) => value,
            None => DEFAULT_PAGE,
        };
        let selected_size = match per_page {
            Some(value) => value,
            None => DEFAULT_PER_PAGE,
        };
        Self::new(selected_page, selected_size)
    }

    /// The 1-indexed page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The bounded page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Maximum number of rows to fetch.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.per_page
    }

    /// Number of rows to skip before the page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        // page >= 1 is guaranteed by construction and u32 * u32 fits in u64.
        (self.page as u64 - 1) * self.per_page as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Raw pagination parameters as they appear on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Requested page, defaults to [`DEFAULT_PAGE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Requested page size, defaults to [`DEFAULT_PER_PAGE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl TryFrom<PageParams> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: PageParams) -> Result<Self, Self::Error> {
        Self::from_optional(value.page, value.per_page)
    }
}

impl From<PageRequest> for PageParams {
    fn from(value: PageRequest) -> Self {
        Self {
            page: Some(value.page),
            per_page: Some(value.per_page),
        }
    }
}
