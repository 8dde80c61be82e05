//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and transaction lifecycle
//! (begin, commit, rollback) so multi-aggregate writes commit or roll
//! back as one.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    curriculum_repository, stats_repository, ConfigurationRepository, ConfigurationStore,
    CurriculumRepository, CurriculumStore, PasswordResetRepository, PasswordResetStore,
    SessionRepository, SessionStore, StatsRepository, StatsStore, SubscriptionRepository,
    SubscriptionStore, UserRepository, UserStore,
};
use crate::domain::Curriculum;
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. The generic `transaction` method is not mockable; tests
/// provide a hand-rolled implementation instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn curricula(&self) -> Arc<dyn CurriculumRepository>;
    fn sessions(&self) -> Arc<dyn SessionRepository>;
    fn subscriptions(&self) -> Arc<dyn SubscriptionRepository>;
    fn configurations(&self) -> Arc<dyn ConfigurationRepository>;
    fn password_resets(&self) -> Arc<dyn PasswordResetRepository>;
    fn stats(&self) -> Arc<dyn StatsRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on error.
    /// Uses ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All operations performed through this context belong to the same
/// database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Transaction-scoped curriculum repository
    pub fn curricula(&self) -> TxCurriculumRepository<'_> {
        TxCurriculumRepository { txn: self.txn }
    }

    /// Transaction-scoped stats repository
    pub fn stats(&self) -> TxStatsRepository<'_> {
        TxStatsRepository { txn: self.txn }
    }
}

/// Transaction-aware curriculum repository.
///
/// Shares the graph-insert helper with `CurriculumStore` so the pooled
/// and transactional paths cannot drift apart.
pub struct TxCurriculumRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCurriculumRepository<'a> {
    /// Insert a curriculum and its nested rows within the transaction
    pub async fn create(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        curriculum_repository::insert_graph(self.txn, curriculum).await
    }
}

/// Transaction-aware stats repository.
pub struct TxStatsRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxStatsRepository<'a> {
    /// Insert-or-increment the creation counter within the transaction
    pub async fn increment_creation_count(&self, user_id: Uuid) -> AppResult<()> {
        stats_repository::increment(self.txn, user_id).await
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    users: Arc<UserStore>,
    curricula: Arc<CurriculumStore>,
    sessions: Arc<SessionStore>,
    subscriptions: Arc<SubscriptionStore>,
    configurations: Arc<ConfigurationStore>,
    password_resets: Arc<PasswordResetStore>,
    stats: Arc<StatsStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance over an injected connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            curricula: Arc::new(CurriculumStore::new(db.clone())),
            sessions: Arc::new(SessionStore::new(db.clone())),
            subscriptions: Arc::new(SubscriptionStore::new(db.clone())),
            configurations: Arc::new(ConfigurationStore::new(db.clone())),
            password_resets: Arc::new(PasswordResetStore::new(db.clone())),
            stats: Arc::new(StatsStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn curricula(&self) -> Arc<dyn CurriculumRepository> {
        self.curricula.clone()
    }

    fn sessions(&self) -> Arc<dyn SessionRepository> {
        self.sessions.clone()
    }

    fn subscriptions(&self) -> Arc<dyn SubscriptionRepository> {
        self.subscriptions.clone()
    }

    fn configurations(&self) -> Arc<dyn ConfigurationRepository> {
        self.configurations.clone()
    }

    fn password_resets(&self) -> Arc<dyn PasswordResetRepository> {
        self.password_resets.clone()
    }

    fn stats(&self) -> Arc<dyn StatsRepository> {
        self.stats.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
