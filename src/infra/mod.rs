//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection, migrations and repositories
//! - Redis cache
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, EntityCache};
pub use db::{Database, Migrator};
pub use repositories::{
    ConfigurationRepository, ConfigurationStore, CurriculumRepository, CurriculumStore,
    PasswordResetRepository, PasswordResetStore, SessionRepository, SessionStore,
    StatsRepository, StatsStore, SubscriptionRepository, SubscriptionStore, UserRepository,
    UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxCurriculumRepository, TxStatsRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockEntityCache;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockConfigurationRepository, MockCurriculumRepository, MockPasswordResetRepository,
    MockSessionRepository, MockStatsRepository, MockSubscriptionRepository, MockUserRepository,
};
