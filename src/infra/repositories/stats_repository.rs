//! Curriculum creation stats repository.
//!
//! The counter is an upsert-or-increment: present rows are bumped with a
//! single server-side arithmetic update (never read-then-write on the
//! client), so concurrent increments lose no updates.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use super::entities::curriculum_stats::{self, ActiveModel, Entity as StatsEntity};
use crate::domain::CurriculumCreationStats;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stats repository trait for dependency injection.
///
/// The counter tracks lifetime creations and is unaffected by
/// curriculum deletion.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Insert-or-increment the creation counter for a user
    async fn increment_creation_count(&self, user_id: Uuid) -> AppResult<()>;

    /// Current counter value; 0 when no row exists (absence is not an error)
    async fn get_by_user_id(&self, user_id: Uuid) -> AppResult<i64>;
}

/// Insert-or-increment on `conn`.
///
/// Shared by the pooled store and the transaction-scoped repository.
/// The increment goes first: when the row exists this is one atomic
/// statement. A lost race on the first insert surfaces as a unique
/// violation on user_id, and the retry lands on the freshly inserted row.
pub(crate) async fn increment<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> AppResult<()> {
    let updated = bump(conn, user_id).await?;
    if updated > 0 {
        return Ok(());
    }

    match ActiveModel::from(&CurriculumCreationStats::first(user_id))
        .insert(conn)
        .await
        .map_err(AppError::from)
    {
        Ok(_) => Ok(()),
        Err(AppError::Conflict(_)) => {
            if bump(conn, user_id).await? == 0 {
                return Err(AppError::internal(format!(
                    "Creation counter vanished for user {}",
                    user_id
                )));
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn bump<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> AppResult<u64> {
    let result = StatsEntity::update_many()
        .col_expr(
            curriculum_stats::Column::TotalCreations,
            Expr::col(curriculum_stats::Column::TotalCreations).add(1),
        )
        .col_expr(curriculum_stats::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(curriculum_stats::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.rows_affected)
}

/// Concrete implementation of StatsRepository
pub struct StatsStore {
    db: DatabaseConnection,
}

impl StatsStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatsRepository for StatsStore {
    async fn increment_creation_count(&self, user_id: Uuid) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        match increment(&txn, user_id).await {
            Ok(()) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Stats increment rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn get_by_user_id(&self, user_id: Uuid) -> AppResult<i64> {
        let row = StatsEntity::find()
            .filter(curriculum_stats::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(|model| model.total_creations).unwrap_or(0))
    }
}
