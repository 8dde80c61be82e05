//! Centralized error handling.
//!
//! Provides a unified error type for the whole crate. Store and cache
//! failures are classified here so callers never see raw driver errors.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Cache payload codec failures
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // External service errors
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Database error")]
    Database(DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error code for logs and clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Deserialization(_) => "DESERIALIZATION_ERROR",
            AppError::Cache(_) => "CACHE_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Classify store errors: constraint violations become conflicts so that
/// callers can distinguish them from transport/query failures.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => AppError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => AppError::Conflict(msg),
            _ => match err {
                DbErr::RecordNotFound(_) => AppError::NotFound,
                other => AppError::Database(other),
            },
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn cache(msg: impl Into<String>) -> Self {
        AppError::Cache(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_ext_maps_none_to_not_found() {
        let missing: Option<u32> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
    }

    #[test]
    fn record_not_found_classifies_as_not_found() {
        let err = AppError::from(DbErr::RecordNotFound("users".into()));
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
