//! Subscription repository (at most one row per user).

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::subscription::{self, ActiveModel, Entity as SubscriptionEntity};
use crate::domain::{Audit, Subscription};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Subscription repository trait for dependency injection.
///
/// Status transitions arrive from external billing events; this layer
/// stores reported state and never re-derives it.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Persist a new subscription; conflicts when the user already has one
    async fn create(&self, subscription: Subscription) -> AppResult<Subscription>;

    /// Get a user's active subscription row
    async fn get_by_user_id(&self, user_id: Uuid) -> AppResult<Subscription>;

    /// Look up by the external billing subscription id (webhook path)
    async fn get_by_stripe_subscription_id(&self, stripe_id: &str) -> AppResult<Subscription>;

    /// Full-record replace of all mutable fields
    async fn update(&self, subscription: Subscription) -> AppResult<Subscription>;

    /// Soft delete by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of SubscriptionRepository with soft delete
pub struct SubscriptionStore {
    db: DatabaseConnection,
}

impl SubscriptionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionStore {
    async fn create(&self, mut subscription: Subscription) -> AppResult<Subscription> {
        if subscription.id.is_nil() {
            subscription.id = Uuid::new_v4();
        }
        subscription.audit = Audit::now();

        let model = ActiveModel::from(&subscription)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Subscription::from(model))
    }

    async fn get_by_user_id(&self, user_id: Uuid) -> AppResult<Subscription> {
        SubscriptionEntity::find()
            .filter(subscription::Column::UserId.eq(user_id))
            .filter(subscription::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Subscription::from)
            .ok_or_not_found()
    }

    async fn get_by_stripe_subscription_id(&self, stripe_id: &str) -> AppResult<Subscription> {
        SubscriptionEntity::find()
            .filter(subscription::Column::StripeSubscriptionId.eq(stripe_id))
            .filter(subscription::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Subscription::from)
            .ok_or_not_found()
    }

    async fn update(&self, subscription: Subscription) -> AppResult<Subscription> {
        let existing = SubscriptionEntity::find_by_id(subscription.id)
            .filter(subscription::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active = ActiveModel::from(&subscription);
        active.user_id = Set(existing.user_id);
        active.created_at = Set(existing.created_at);
        active.updated_at = Set(Utc::now());
        active.deleted_at = Set(existing.deleted_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Subscription::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let existing = SubscriptionEntity::find_by_id(id)
            .filter(subscription::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        let now = Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }
}
