//! Curriculum service - resume lifecycle with cache-aside reads.
//!
//! Creation runs the graph insert and the usage counter bump in one
//! transaction; mutations invalidate the curriculum key and the owner's
//! cached list views.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::CURRICULUM_SORT_FIELDS;
use crate::domain::Curriculum;
use crate::errors::{AppError, AppResult};
use crate::infra::{EntityCache, UnitOfWork};
use crate::types::{Paginated, PaginationParams, Sorting};

/// Curriculum service trait for dependency injection.
#[async_trait]
pub trait CurriculumService: Send + Sync {
    /// Create a curriculum with its nested rows and bump the owner's
    /// creation counter, atomically
    async fn create_curriculum(&self, curriculum: Curriculum) -> AppResult<Curriculum>;

    /// Get active curriculum by ID (cache-aside)
    async fn get_curriculum(&self, id: Uuid) -> AppResult<Curriculum>;

    /// List a user's curricula, paginated and sorted (cache-aside)
    async fn list_curricula(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
        sort_by: Option<String>,
        order: Option<String>,
    ) -> AppResult<Paginated<Curriculum>>;

    /// Full-record update; invalidates the curriculum and list caches
    async fn update_curriculum(&self, curriculum: Curriculum) -> AppResult<Curriculum>;

    /// Soft delete; invalidates the curriculum and list caches.
    /// The creation counter is untouched.
    async fn delete_curriculum(&self, id: Uuid) -> AppResult<()>;

    /// Lifetime creation counter for a user (0 when never incremented)
    async fn creation_count(&self, user_id: Uuid) -> AppResult<i64>;
}

/// Concrete implementation of CurriculumService using Unit of Work.
pub struct CurriculumManager<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Arc<dyn EntityCache>,
}

impl<U: UnitOfWork> CurriculumManager<U> {
    /// Create new curriculum service instance
    pub fn new(uow: Arc<U>, cache: Arc<dyn EntityCache>) -> Self {
        Self { uow, cache }
    }

    async fn invalidate_views(&self, id: &Uuid, user_id: &Uuid) {
        if let Err(e) = self.cache.invalidate_curriculum(id).await {
            tracing::warn!(curriculum_id = %id, error = %e, "Curriculum cache invalidation failed");
        }
        if let Err(e) = self.cache.invalidate_user_curricula(user_id).await {
            tracing::warn!(user_id = %user_id, error = %e, "Curriculum list cache invalidation failed");
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> CurriculumService for CurriculumManager<U> {
    async fn create_curriculum(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        if !curriculum.has_valid_ranges() {
            return Err(AppError::validation(
                "start_date must not come after end_date",
            ));
        }

        let user_id = curriculum.user_id;

        let created = self
            .uow
            .transaction(|ctx| {
                Box::pin(async move {
                    let created = ctx.curricula().create(curriculum).await?;
                    ctx.stats().increment_creation_count(user_id).await?;
                    Ok(created)
                })
            })
            .await?;

        if let Err(e) = self.cache.invalidate_user_curricula(&user_id).await {
            tracing::warn!(user_id = %user_id, error = %e, "Curriculum list cache invalidation failed");
        }

        Ok(created)
    }

    async fn get_curriculum(&self, id: Uuid) -> AppResult<Curriculum> {
        match self.cache.get_curriculum(&id).await {
            Ok(Some(curriculum)) => return Ok(curriculum),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(curriculum_id = %id, error = %e, "Curriculum cache read failed, falling back to store");
            }
        }

        let curriculum = self.uow.curricula().get_by_id(id).await?;

        if let Err(e) = self.cache.set_curriculum(&curriculum).await {
            tracing::warn!(curriculum_id = %id, error = %e, "Curriculum cache populate failed");
        }

        Ok(curriculum)
    }

    async fn list_curricula(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
        sort_by: Option<String>,
        order: Option<String>,
    ) -> AppResult<Paginated<Curriculum>> {
        // Normalize once so the cache key and the query agree
        let sorting =
            Sorting::normalize(sort_by.as_deref(), order.as_deref(), CURRICULUM_SORT_FIELDS);

        match self
            .cache
            .get_user_curricula(&user_id, params.page, params.limit(), &sorting)
            .await
        {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Curriculum list cache read failed, falling back to store");
            }
        }

        let page = self
            .uow
            .curricula()
            .list_by_user(
                user_id,
                params,
                Some(sorting.field.clone()),
                Some(sorting.order.as_str().to_string()),
            )
            .await?;

        if let Err(e) = self
            .cache
            .set_user_curricula(&user_id, params.page, params.limit(), &sorting, &page)
            .await
        {
            tracing::warn!(user_id = %user_id, error = %e, "Curriculum list cache populate failed");
        }

        Ok(page)
    }

    async fn update_curriculum(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        if !curriculum.has_valid_ranges() {
            return Err(AppError::validation(
                "start_date must not come after end_date",
            ));
        }

        let updated = self.uow.curricula().update(curriculum).await?;

        self.invalidate_views(&updated.id, &updated.user_id).await;

        Ok(updated)
    }

    async fn delete_curriculum(&self, id: Uuid) -> AppResult<()> {
        // Fetch first: the owner id is needed for list invalidation
        let existing = self.uow.curricula().get_by_id(id).await?;

        self.uow.curricula().delete(id).await?;

        self.invalidate_views(&id, &existing.user_id).await;

        Ok(())
    }

    async fn creation_count(&self, user_id: Uuid) -> AppResult<i64> {
        self.uow.stats().get_by_user_id(user_id).await
    }
}
