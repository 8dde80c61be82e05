//! User service - user lifecycle with cache-aside reads.
//!
//! Reads check the cache first and populate it on miss; writes go to the
//! store and invalidate the derived key. Cache failures are logged and
//! treated as misses so the store stays authoritative.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::User;
use crate::errors::AppResult;
use crate::infra::{EntityCache, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new user
    async fn create_user(&self, user: User) -> AppResult<User>;

    /// Get active user by ID (cache-aside)
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get active user by email address
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// List active users, paginated and sorted
    async fn list_users(
        &self,
        params: &PaginationParams,
        sort_by: Option<String>,
        order: Option<String>,
    ) -> AppResult<Paginated<User>>;

    /// Full-record update; invalidates the cached entry
    async fn update_user(&self, user: User) -> AppResult<User>;

    /// Soft delete the user, deactivate their sessions and invalidate
    /// the cached entry
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Arc<dyn EntityCache>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance
    pub fn new(uow: Arc<U>, cache: Arc<dyn EntityCache>) -> Self {
        Self { uow, cache }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, user: User) -> AppResult<User> {
        self.uow.users().create(user).await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        match self.cache.get_user(&id).await {
            Ok(Some(user)) => return Ok(user),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "User cache read failed, falling back to store");
            }
        }

        let user = self.uow.users().get_by_id(id).await?;

        if let Err(e) = self.cache.set_user(&user).await {
            tracing::warn!(user_id = %id, error = %e, "User cache populate failed");
        }

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.uow.users().get_by_email(email).await
    }

    async fn list_users(
        &self,
        params: &PaginationParams,
        sort_by: Option<String>,
        order: Option<String>,
    ) -> AppResult<Paginated<User>> {
        self.uow.users().list(params, sort_by, order).await
    }

    async fn update_user(&self, user: User) -> AppResult<User> {
        let updated = self.uow.users().update(user).await?;

        if let Err(e) = self.cache.invalidate_user(&updated.id).await {
            tracing::warn!(user_id = %updated.id, error = %e, "User cache invalidation failed");
        }

        Ok(updated)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().delete(id).await?;

        // Logged-in sessions must stop resolving once the owner is gone
        self.uow.sessions().deactivate_by_user_id(id).await?;

        if let Err(e) = self.cache.invalidate_user(&id).await {
            tracing::warn!(user_id = %id, error = %e, "User cache invalidation failed");
        }

        Ok(())
    }
}
