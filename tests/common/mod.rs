//! Shared test doubles for service tests.

use std::sync::Arc;

use async_trait::async_trait;

use curricula::errors::{AppError, AppResult};
use curricula::infra::{
    ConfigurationRepository, CurriculumRepository, MockConfigurationRepository,
    MockCurriculumRepository, MockPasswordResetRepository, MockSessionRepository,
    MockStatsRepository, MockSubscriptionRepository, MockUserRepository,
    PasswordResetRepository, SessionRepository, StatsRepository, SubscriptionRepository,
    TransactionContext, UnitOfWork, UserRepository,
};

/// Test mock for UnitOfWork wrapping per-repository mocks.
///
/// The generic `transaction` method cannot run against mocks (it needs a
/// live database transaction), so it reports unsupported; transactional
/// flows are covered by repository-level integration tests.
pub struct TestUnitOfWork {
    pub users: Arc<MockUserRepository>,
    pub curricula: Arc<MockCurriculumRepository>,
    pub sessions: Arc<MockSessionRepository>,
    pub subscriptions: Arc<MockSubscriptionRepository>,
    pub configurations: Arc<MockConfigurationRepository>,
    pub password_resets: Arc<MockPasswordResetRepository>,
    pub stats: Arc<MockStatsRepository>,
}

impl TestUnitOfWork {
    /// All-empty mocks; any unexpected repository call fails the test
    pub fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            curricula: Arc::new(MockCurriculumRepository::new()),
            sessions: Arc::new(MockSessionRepository::new()),
            subscriptions: Arc::new(MockSubscriptionRepository::new()),
            configurations: Arc::new(MockConfigurationRepository::new()),
            password_resets: Arc::new(MockPasswordResetRepository::new()),
            stats: Arc::new(MockStatsRepository::new()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
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

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}
