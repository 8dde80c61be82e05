//! Password reset repository.
//!
//! Tokens are hard-deleted by expiry sweeps; redemption flips `used`
//! so replayed tokens stay detectable until swept.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use super::entities::password_reset::{self, ActiveModel, Entity as PasswordResetEntity};
use crate::domain::PasswordReset;
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Password reset repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Persist a new reset token; conflicts on a duplicate token
    async fn create(&self, reset: PasswordReset) -> AppResult<PasswordReset>;

    /// Get the redeemable reset for a token.
    ///
    /// The redeemability window (`NOT used AND expires_at > now`) is
    /// applied server-side: a used token is never returned, even when
    /// its expiry is still in the future.
    async fn get_by_token(&self, token: &str) -> AppResult<PasswordReset>;

    /// Mark a token as redeemed
    async fn mark_used(&self, token: &str) -> AppResult<()>;

    /// Bulk hard delete of expired rows; intended for periodic sweeps
    async fn delete_expired(&self) -> AppResult<u64>;
}

/// Concrete implementation of PasswordResetRepository
pub struct PasswordResetStore {
    db: DatabaseConnection,
}

impl PasswordResetStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PasswordResetRepository for PasswordResetStore {
    async fn create(&self, mut reset: PasswordReset) -> AppResult<PasswordReset> {
        if reset.id.is_nil() {
            reset.id = Uuid::new_v4();
        }

        let model = ActiveModel::from(&reset)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(PasswordReset::from(model))
    }

    async fn get_by_token(&self, token: &str) -> AppResult<PasswordReset> {
        PasswordResetEntity::find()
            .filter(password_reset::Column::Token.eq(token))
            .filter(password_reset::Column::Used.eq(false))
            .filter(password_reset::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(PasswordReset::from)
            .ok_or_not_found()
    }

    async fn mark_used(&self, token: &str) -> AppResult<()> {
        let result = PasswordResetEntity::update_many()
            .col_expr(password_reset::Column::Used, Expr::value(true))
            .filter(password_reset::Column::Token.eq(token))
            .filter(password_reset::Column::Used.eq(false))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let result = PasswordResetEntity::delete_many()
            .filter(password_reset::Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected > 0 {
            tracing::info!(count = result.rows_affected, "Expired reset tokens removed");
        }

        Ok(result.rows_affected)
    }
}
