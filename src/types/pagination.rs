//! Pagination and sorting types for list queries.
//!
//! Sort input follows a fallback-not-fail policy: unrecognized fields or
//! orders are silently replaced with safe defaults so that listings never
//! error on a bad query-string value.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, MAX_PAGE_SIZE};

/// Pagination query parameters (reusable across all list queries)
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(DEFAULT_PAGE_NUMBER),
            per_page: per_page.max(1),
        }
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit()
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Sort direction, defaulting to newest-first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a caller-supplied order, falling back to `Desc` on anything
    /// that is not ASC/DESC (case-insensitive).
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl From<SortOrder> for sea_orm::Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => sea_orm::Order::Asc,
            SortOrder::Desc => sea_orm::Order::Desc,
        }
    }
}

/// Normalized sort configuration: always a recognized column and order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorting {
    pub field: String,
    pub order: SortOrder,
}

impl Sorting {
    /// Validate caller input against an allow-list of sortable columns.
    ///
    /// Unrecognized or empty fields fall back to `created_at`; unrecognized
    /// orders fall back to `desc`. Never fails.
    pub fn normalize(field: Option<&str>, order: Option<&str>, allowed: &[&str]) -> Self {
        let field = field
            .map(str::trim)
            .filter(|f| allowed.contains(f))
            .unwrap_or(DEFAULT_SORT_FIELD)
            .to_string();

        let order = order
            .map(SortOrder::parse_or_default)
            .unwrap_or_default();

        Self { field, order }
    }
}

impl Default for Sorting {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_string(),
            order: SortOrder::Desc,
        }
    }
}

/// Paginated response wrapper (reusable for all list results)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::USER_SORT_FIELDS;

    #[test]
    fn offset_is_zero_based_from_one_indexed_pages() {
        let params = PaginationParams::new(1, 10);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams::new(3, 10);
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn page_zero_is_corrected_not_rejected() {
        let params = PaginationParams::new(0, 0);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn per_page_is_capped() {
        let params = PaginationParams::new(1, 10_000);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn unknown_sort_field_falls_back_to_created_at() {
        let sorting = Sorting::normalize(Some("password_hash"), None, USER_SORT_FIELDS);
        assert_eq!(sorting.field, "created_at");
        assert_eq!(sorting.order, SortOrder::Desc);
    }

    #[test]
    fn empty_sort_field_falls_back_to_created_at() {
        let sorting = Sorting::normalize(Some(""), Some("ASC"), USER_SORT_FIELDS);
        assert_eq!(sorting.field, "created_at");
        assert_eq!(sorting.order, SortOrder::Asc);
    }

    #[test]
    fn allowed_field_and_order_pass_through() {
        let sorting = Sorting::normalize(Some("email"), Some("asc"), USER_SORT_FIELDS);
        assert_eq!(sorting.field, "email");
        assert_eq!(sorting.order, SortOrder::Asc);
    }

    #[test]
    fn garbage_order_falls_back_to_desc() {
        assert_eq!(SortOrder::parse_or_default("sideways"), SortOrder::Desc);
        assert_eq!(SortOrder::parse_or_default("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse_or_default(" Asc "), SortOrder::Asc);
    }

    #[test]
    fn paginated_meta_rounds_total_pages_up() {
        let page = Paginated::new(vec![1, 2, 3], 1, 10, 21);
        assert_eq!(page.meta.total_pages, 3);
    }
}
