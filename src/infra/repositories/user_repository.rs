//! User repository implementation with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::USER_SORT_FIELDS;
use crate::domain::{Audit, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::{Paginated, PaginationParams, Sorting};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// All query methods exclude soft-deleted records.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; a nil id is replaced with a fresh one
    async fn create(&self, user: User) -> AppResult<User>;

    /// Get active user by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<User>;

    /// Get active user by email address
    async fn get_by_email(&self, email: &str) -> AppResult<User>;

    /// List active users, paginated and sorted.
    ///
    /// Unrecognized sort fields/orders silently fall back to
    /// `created_at DESC`.
    async fn list(
        &self,
        params: &PaginationParams,
        sort_by: Option<String>,
        order: Option<String>,
    ) -> AppResult<Paginated<User>>;

    /// Full-record replace of all mutable fields
    async fn update(&self, user: User) -> AppResult<User>;

    /// Soft delete user by ID (sets deleted_at timestamp)
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

fn sort_column(field: &str) -> user::Column {
    match field {
        "updated_at" => user::Column::UpdatedAt,
        "full_name" => user::Column::FullName,
        "email" => user::Column::Email,
        _ => user::Column::CreatedAt,
    }
}

/// Concrete implementation of UserRepository with soft delete
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, mut user: User) -> AppResult<User> {
        if user.id.is_nil() {
            user.id = Uuid::new_v4();
        }
        user.audit = Audit::now();

        let model = ActiveModel::from(&user)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(User::from(model))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn list(
        &self,
        params: &PaginationParams,
        sort_by: Option<String>,
        order: Option<String>,
    ) -> AppResult<Paginated<User>> {
        let sorting = Sorting::normalize(sort_by.as_deref(), order.as_deref(), USER_SORT_FIELDS);

        let query = UserEntity::find().filter(user::Column::DeletedAt.is_null());
        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;

        let models = query
            .order_by(sort_column(&sorting.field), Order::from(sorting.order))
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let data = models.into_iter().map(User::from).collect();
        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let existing = UserEntity::find_by_id(user.id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active = ActiveModel::from(&user);
        active.created_at = Set(existing.created_at);
        active.updated_at = Set(chrono::Utc::now());
        active.deleted_at = Set(existing.deleted_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let existing = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        let now = chrono::Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }
}
