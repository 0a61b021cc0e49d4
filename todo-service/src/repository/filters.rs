//! Pagination and sorting for list queries
//!
//! `sort` is spliced into the ORDER BY clause, so it is only ever accepted
//! when it is a member of the caller's allow-list.
//!
//! # Example
//!
//! ```rust
//! use todo_service::repository::{Filters, LIST_SORT_SAFELIST};
//!
//! let filters = Filters::new(3, 20, "-name", LIST_SORT_SAFELIST);
//! assert_eq!(filters.sort_column(), "name");
//! assert_eq!(filters.sort_order(), "DESC");
//! assert_eq!(filters.limit(), 20);
//! assert_eq!(filters.offset(), 40);
//! ```

use serde::{Deserialize, Serialize};

use crate::validator::{permitted_value, Validator};

/// Highest page number a client may request
pub const MAX_PAGE: i64 = 1000;

/// Largest page a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sort values accepted by the list endpoint
pub const LIST_SORT_SAFELIST: &[&str] = &[
    "id",
    "created_at",
    "name",
    "task",
    "status",
    "-id",
    "-created_at",
    "-name",
    "-task",
    "-status",
];

/// Pagination and sort parameters of a list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    /// Page number, 1-indexed
    pub page: i64,
    /// Records per page
    pub page_size: i64,
    /// Column to sort by, prefixed with `-` for descending order
    pub sort: String,
    /// Accepted values for `sort`
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    /// Create filters with an explicit allow-list
    pub fn new(
        page: i64,
        page_size: i64,
        sort: impl Into<String>,
        sort_safelist: &'static [&'static str],
    ) -> Self {
        Self {
            page,
            page_size,
            sort: sort.into(),
            sort_safelist,
        }
    }

    /// True if `sort` is in the allow-list
    pub fn sort_is_safe(&self) -> bool {
        permitted_value(&self.sort.as_str(), self.sort_safelist)
    }

    /// The sort value without its direction prefix
    pub fn sort_column(&self) -> &str {
        self.sort.strip_prefix('-').unwrap_or(&self.sort)
    }

    /// `DESC` for `-` prefixed sort values, `ASC` otherwise
    pub fn sort_order(&self) -> &'static str {
        if self.sort.starts_with('-') {
            "DESC"
        } else {
            "ASC"
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip; only meaningful after [`validate_filters`] passed
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Check page bounds and the sort allow-list
pub fn validate_filters(v: &mut Validator, filters: &Filters) {
    v.check(filters.page > 0, "page", "must be greater than zero");
    v.check(filters.page <= MAX_PAGE, "page", "must be a maximum of 1000");

    v.check(filters.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        filters.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );

    v.check(filters.sort_is_safe(), "sort", "invalid sort value");
}

/// Pagination summary returned with list results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

/// Compute pagination metadata; all fields are zero when nothing matched
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records == 0 || page_size <= 0 {
        return Metadata::default();
    }

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}
