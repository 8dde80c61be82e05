//! Shared types used across repositories and services.

mod pagination;

pub use pagination::{Paginated, PaginationMeta, PaginationParams, SortOrder, Sorting};
