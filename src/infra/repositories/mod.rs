//! Repository layer - Data access abstraction
//!
//! One repository per entity family, wrapping the store with query
//! construction, transactional grouping, and error normalization.

pub(crate) mod entities;

mod configuration_repository;
pub(crate) mod curriculum_repository;
mod password_reset_repository;
mod session_repository;
pub(crate) mod stats_repository;
mod subscription_repository;
mod user_repository;

pub use configuration_repository::{ConfigurationRepository, ConfigurationStore};
pub use curriculum_repository::{CurriculumRepository, CurriculumStore};
pub use password_reset_repository::{PasswordResetRepository, PasswordResetStore};
pub use session_repository::{SessionRepository, SessionStore};
pub use stats_repository::{StatsRepository, StatsStore};
pub use subscription_repository::{SubscriptionRepository, SubscriptionStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use configuration_repository::MockConfigurationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use curriculum_repository::MockCurriculumRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use password_reset_repository::MockPasswordResetRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use session_repository::MockSessionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use stats_repository::MockStatsRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use subscription_repository::MockSubscriptionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
