//! Pagination Types
//!
//! Page requests with a single-property sort and the page envelope returned to
//! clients. The JSON field names follow the camelCase convention the web
//! client already reads (`content`, `totalElements`, `last`, ...).

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Sort direction for a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Single-property sort order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
    /// Sort by `property`, rejecting blank names
    pub fn by(property: impl Into<String>, direction: Direction) -> Result<Self, SharedError> {
        let property = property.into();
        if property.trim().is_empty() {
            return Err(SharedError::invalid_argument(
                "Property must not be null or empty",
            ));
        }
        Ok(Self {
            property,
            direction,
        })
    }
}

/// A validated request for one page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
    sort: Sort,
}

impl PageRequest {
    /// Build a page request.
    ///
    /// `page` is zero-based. Negative pages, sizes below one and blank sort
    /// properties are rejected as invalid arguments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waypoint::shared::page::{Direction, PageRequest};
    ///
    /// let request = PageRequest::new(2, 25, "locationCode", false).unwrap();
    /// assert_eq!(request.offset(), 50);
    /// assert_eq!(request.sort().direction, Direction::Desc);
    /// ```
    pub fn new(
        page: i64,
        size: i64,
        sort_by: impl Into<String>,
        ascending: bool,
    ) -> Result<Self, SharedError> {
        if page < 0 {
            return Err(SharedError::invalid_argument(
                "Page index must not be less than zero",
            ));
        }
        if size < 1 {
            return Err(SharedError::invalid_argument(
                "Page size must not be less than one",
            ));
        }
        let sort = Sort::by(sort_by, Direction::from_ascending(ascending))?;

        Ok(Self {
            page: page as u64,
            size: size as u64,
            sort,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Number of rows to skip before this page
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// Query-string form of a page request
///
/// Missing parameters fall back to `page=0`, `size=10`, `sortBy=id`,
/// `ascending=true`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_size() -> i64 {
    10
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_ascending() -> bool {
    true
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_size(),
            sort_by: default_sort_by(),
            ascending: default_ascending(),
        }
    }
}

impl PageParams {
    /// Convert into a [`PageRequest`], capping the page size at `max_size`
    pub fn into_request(self, max_size: u64) -> Result<PageRequest, SharedError> {
        let request = PageRequest::new(self.page, self.size, self.sort_by, self.ascending)?;
        if request.size() > max_size {
            return Err(SharedError::invalid_argument(format!(
                "Page size must not be greater than {}",
                max_size
            )));
        }
        Ok(request)
    }
}

/// One page of results plus the paging metadata clients need to continue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size());
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages,
            first: request.page() == 0,
            last: request.page() + 1 >= total_pages,
        }
    }
}
