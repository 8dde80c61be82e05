//! Configuration repository (exactly one row per user).

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::configuration::{self, ActiveModel, Entity as ConfigurationEntity};
use crate::domain::{Audit, Configuration};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Configuration repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ConfigurationRepository: Send + Sync {
    /// Persist a new configuration; conflicts when the user already has one
    async fn create(&self, configuration: Configuration) -> AppResult<Configuration>;

    /// Get a user's active configuration
    async fn get_by_user_id(&self, user_id: Uuid) -> AppResult<Configuration>;

    /// Full-record replace of all mutable fields
    async fn update(&self, configuration: Configuration) -> AppResult<Configuration>;

    /// Soft delete by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ConfigurationRepository with soft delete
pub struct ConfigurationStore {
    db: DatabaseConnection,
}

impl ConfigurationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConfigurationRepository for ConfigurationStore {
    async fn create(&self, mut configuration: Configuration) -> AppResult<Configuration> {
        if configuration.id.is_nil() {
            configuration.id = Uuid::new_v4();
        }
        configuration.audit = Audit::now();

        let model = ActiveModel::from(&configuration)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Configuration::from(model))
    }

    async fn get_by_user_id(&self, user_id: Uuid) -> AppResult<Configuration> {
        ConfigurationEntity::find()
            .filter(configuration::Column::UserId.eq(user_id))
            .filter(configuration::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(Configuration::from)
            .ok_or_not_found()
    }

    async fn update(&self, configuration: Configuration) -> AppResult<Configuration> {
        let existing = ConfigurationEntity::find_by_id(configuration.id)
            .filter(configuration::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active = ActiveModel::from(&configuration);
        active.user_id = Set(existing.user_id);
        active.created_at = Set(existing.created_at);
        active.updated_at = Set(Utc::now());
        active.deleted_at = Set(existing.deleted_at);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Configuration::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let existing = ConfigurationEntity::find_by_id(id)
            .filter(configuration::Column::DeletedAt.is_null())
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
