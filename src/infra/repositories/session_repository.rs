//! Session repository.
//!
//! Sessions are hard-deleted: logout flips `is_active`, and a periodic
//! sweep removes expired rows.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use super::entities::session::{self, ActiveModel, Entity as SessionEntity};
use crate::domain::Session;
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session; a nil id is replaced with a fresh one
    async fn create(&self, session: Session) -> AppResult<Session>;

    /// Get the live session for a token.
    ///
    /// The validity window (`is_active AND expires_at > now`) is applied
    /// server-side: callers never see an inactive or expired row.
    async fn get_by_token(&self, token: &str) -> AppResult<Session>;

    /// List a user's live sessions
    async fn list_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<Session>>;

    /// Flip `is_active` off for one token without deleting the row
    async fn deactivate_by_token(&self, token: &str) -> AppResult<u64>;

    /// Flip `is_active` off for all of a user's sessions
    async fn deactivate_by_user_id(&self, user_id: Uuid) -> AppResult<u64>;

    /// Bulk hard delete of expired rows; intended for periodic sweeps,
    /// never tied to a request transaction
    async fn delete_expired(&self) -> AppResult<u64>;
}

/// Concrete implementation of SessionRepository
pub struct SessionStore {
    db: DatabaseConnection,
}

impl SessionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn create(&self, mut session: Session) -> AppResult<Session> {
        if session.id.is_nil() {
            session.id = Uuid::new_v4();
        }

        let model = ActiveModel::from(&session)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Session::from(model))
    }

    async fn get_by_token(&self, token: &str) -> AppResult<Session> {
        SessionEntity::find()
            .filter(session::Column::Token.eq(token))
            .filter(session::Column::IsActive.eq(true))
            .filter(session::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Session::from)
            .ok_or_not_found()
    }

    async fn list_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<Session>> {
        let models = SessionEntity::find()
            .filter(session::Column::UserId.eq(user_id))
            .filter(session::Column::IsActive.eq(true))
            .filter(session::Column::ExpiresAt.gt(Utc::now()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Session::from).collect())
    }

    async fn deactivate_by_token(&self, token: &str) -> AppResult<u64> {
        let result = SessionEntity::update_many()
            .col_expr(session::Column::IsActive, Expr::value(false))
            .col_expr(session::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(session::Column::Token.eq(token))
            .filter(session::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn deactivate_by_user_id(&self, user_id: Uuid) -> AppResult<u64> {
        let result = SessionEntity::update_many()
            .col_expr(session::Column::IsActive, Expr::value(false))
            .col_expr(session::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(session::Column::UserId.eq(user_id))
            .filter(session::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let result = SessionEntity::delete_many()
            .filter(session::Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected > 0 {
            tracing::info!(count = result.rows_affected, "Expired sessions removed");
        }

        Ok(result.rows_affected)
    }
}
