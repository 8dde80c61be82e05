//! Curriculum repository: the resume aggregate with nested work and
//! education rows.
//!
//! Graph writes (create, update, delete) are transactional: either the
//! curriculum row and all nested rows commit, or none do.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::curriculum::{self, Entity as CurriculumEntity};
use super::entities::{education, work};
use crate::config::CURRICULUM_SORT_FIELDS;
use crate::domain::{Audit, Curriculum, Education, Work};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::{Paginated, PaginationParams, Sorting};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Curriculum repository trait for dependency injection.
///
/// All query methods exclude soft-deleted records and return curricula
/// with their nested work/education entries attached.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CurriculumRepository: Send + Sync {
    /// Persist a curriculum and its nested rows atomically
    async fn create(&self, curriculum: Curriculum) -> AppResult<Curriculum>;

    /// Get active curriculum by ID with nested rows
    async fn get_by_id(&self, id: Uuid) -> AppResult<Curriculum>;

    /// List a user's active curricula, paginated and sorted.
    ///
    /// Unrecognized sort fields/orders silently fall back to
    /// `created_at DESC`.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
        sort_by: Option<String>,
        order: Option<String>,
    ) -> AppResult<Paginated<Curriculum>>;

    /// Full-record replace: overwrites the curriculum row and replaces
    /// its nested rows, atomically
    async fn update(&self, curriculum: Curriculum) -> AppResult<Curriculum>;

    /// Soft delete the curriculum and its nested rows atomically
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

fn sort_column(field: &str) -> curriculum::Column {
    match field {
        "updated_at" => curriculum::Column::UpdatedAt,
        "full_name" => curriculum::Column::FullName,
        _ => curriculum::Column::CreatedAt,
    }
}

/// Insert the curriculum row plus all nested rows on `conn`.
///
/// Shared by the pooled store and the transaction-scoped repository so
/// both paths produce identical graphs.
pub(crate) async fn insert_graph<C: ConnectionTrait>(
    conn: &C,
    mut curriculum: Curriculum,
) -> AppResult<Curriculum> {
    if curriculum.id.is_nil() {
        curriculum.id = Uuid::new_v4();
    }
    curriculum.audit = Audit::now();

    let model = curriculum::ActiveModel::from(&curriculum)
        .insert(conn)
        .await
        .map_err(AppError::from)?;

    let mut created = Curriculum::from(model);

    for mut entry in std::mem::take(&mut curriculum.works) {
        entry.id = Uuid::new_v4();
        entry.curriculum_id = created.id;
        entry.audit = Audit::now();

        let model = work::ActiveModel::from(&entry)
            .insert(conn)
            .await
            .map_err(AppError::from)?;
        created.works.push(Work::from(model));
    }

    for mut entry in std::mem::take(&mut curriculum.educations) {
        entry.id = Uuid::new_v4();
        entry.curriculum_id = created.id;
        entry.audit = Audit::now();

        let model = education::ActiveModel::from(&entry)
            .insert(conn)
            .await
            .map_err(AppError::from)?;
        created.educations.push(Education::from(model));
    }

    Ok(created)
}

/// Attach active nested rows to the given curricula in one query per table.
async fn load_nested<C: ConnectionTrait>(
    conn: &C,
    curricula: &mut [Curriculum],
) -> AppResult<()> {
    if curricula.is_empty() {
        return Ok(());
    }

    let ids: Vec<Uuid> = curricula.iter().map(|c| c.id).collect();

    let works = work::Entity::find()
        .filter(work::Column::CurriculumId.is_in(ids.clone()))
        .filter(work::Column::DeletedAt.is_null())
        .order_by_desc(work::Column::StartDate)
        .all(conn)
        .await
        .map_err(AppError::from)?;

    let educations = education::Entity::find()
        .filter(education::Column::CurriculumId.is_in(ids))
        .filter(education::Column::DeletedAt.is_null())
        .order_by_desc(education::Column::StartDate)
        .all(conn)
        .await
        .map_err(AppError::from)?;

    let mut works_by_parent: HashMap<Uuid, Vec<Work>> = HashMap::new();
    for model in works {
        works_by_parent
            .entry(model.curriculum_id)
            .or_default()
            .push(Work::from(model));
    }

    let mut educations_by_parent: HashMap<Uuid, Vec<Education>> = HashMap::new();
    for model in educations {
        educations_by_parent
            .entry(model.curriculum_id)
            .or_default()
            .push(Education::from(model));
    }

    for entry in curricula.iter_mut() {
        entry.works = works_by_parent.remove(&entry.id).unwrap_or_default();
        entry.educations = educations_by_parent.remove(&entry.id).unwrap_or_default();
    }

    Ok(())
}

async fn find_active<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<curriculum::Model>> {
    CurriculumEntity::find_by_id(id)
        .filter(curriculum::Column::DeletedAt.is_null())
        .one(conn)
        .await
        .map_err(AppError::from)
}

/// Tombstone all active nested rows of a curriculum
async fn tombstone_nested<C: ConnectionTrait>(conn: &C, curriculum_id: Uuid) -> AppResult<()> {
    let now = Utc::now();

    work::Entity::update_many()
        .col_expr(work::Column::DeletedAt, Expr::value(now))
        .col_expr(work::Column::UpdatedAt, Expr::value(now))
        .filter(work::Column::CurriculumId.eq(curriculum_id))
        .filter(work::Column::DeletedAt.is_null())
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    education::Entity::update_many()
        .col_expr(education::Column::DeletedAt, Expr::value(now))
        .col_expr(education::Column::UpdatedAt, Expr::value(now))
        .filter(education::Column::CurriculumId.eq(curriculum_id))
        .filter(education::Column::DeletedAt.is_null())
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    Ok(())
}

/// Concrete implementation of CurriculumRepository with soft delete
pub struct CurriculumStore {
    db: DatabaseConnection,
}

impl CurriculumStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CurriculumRepository for CurriculumStore {
    async fn create(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        match insert_graph(&txn, curriculum).await {
            Ok(created) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(created)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Curriculum create rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Curriculum> {
        let model = find_active(&self.db, id).await?.ok_or_not_found()?;

        let mut curricula = vec![Curriculum::from(model)];
        load_nested(&self.db, &mut curricula).await?;
        Ok(curricula.remove(0))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        params: &PaginationParams,
        sort_by: Option<String>,
        order: Option<String>,
    ) -> AppResult<Paginated<Curriculum>> {
        let sorting =
            Sorting::normalize(sort_by.as_deref(), order.as_deref(), CURRICULUM_SORT_FIELDS);

        let query = CurriculumEntity::find()
            .filter(curriculum::Column::UserId.eq(user_id))
            .filter(curriculum::Column::DeletedAt.is_null());
        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;

        let models = query
            .order_by(sort_column(&sorting.field), Order::from(sorting.order))
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let mut data: Vec<Curriculum> = models.into_iter().map(Curriculum::from).collect();
        load_nested(&self.db, &mut data).await?;

        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    async fn update(&self, mut curriculum: Curriculum) -> AppResult<Curriculum> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let result = async {
            let existing = find_active(&txn, curriculum.id)
                .await?
                .ok_or(AppError::NotFound)?;

            let mut active = curriculum::ActiveModel::from(&curriculum);
            active.user_id = Set(existing.user_id);
            active.created_at = Set(existing.created_at);
            active.updated_at = Set(Utc::now());
            active.deleted_at = Set(existing.deleted_at);

            let model = active.update(&txn).await.map_err(AppError::from)?;
            let mut updated = Curriculum::from(model);

            // Replace semantics: tombstone the previous entries, insert the
            // incoming set under fresh ids (tombstoned rows keep theirs).
            tombstone_nested(&txn, updated.id).await?;

            for mut entry in std::mem::take(&mut curriculum.works) {
                entry.id = Uuid::new_v4();
                entry.curriculum_id = updated.id;
                entry.audit = Audit::now();

                let model = work::ActiveModel::from(&entry)
                    .insert(&txn)
                    .await
                    .map_err(AppError::from)?;
                updated.works.push(Work::from(model));
            }

            for mut entry in std::mem::take(&mut curriculum.educations) {
                entry.id = Uuid::new_v4();
                entry.curriculum_id = updated.id;
                entry.audit = Audit::now();

                let model = education::ActiveModel::from(&entry)
                    .insert(&txn)
                    .await
                    .map_err(AppError::from)?;
                updated.educations.push(Education::from(model));
            }

            Ok(updated)
        }
        .await;

        match result {
            Ok(updated) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(updated)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Curriculum update rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let result = async {
            let existing = find_active(&txn, id).await?.ok_or(AppError::NotFound)?;

            let mut active: curriculum::ActiveModel = existing.into();
            let now = Utc::now();
            active.deleted_at = Set(Some(now));
            active.updated_at = Set(now);
            active.update(&txn).await.map_err(AppError::from)?;

            tombstone_nested(&txn, id).await
        }
        .await;

        match result {
            Ok(()) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Curriculum delete rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
