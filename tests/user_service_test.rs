//! User service unit tests.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use curricula::domain::{Audit, User};
use curricula::errors::AppError;
use curricula::infra::{MockEntityCache, MockSessionRepository, MockUserRepository};
use curricula::services::{UserManager, UserService};

use common::TestUnitOfWork;

fn test_user(id: Uuid) -> User {
    User {
        id,
        email: "test@example.com".to_string(),
        password_hash: "hashed".to_string(),
        full_name: "Test User".to_string(),
        is_admin: false,
        audit: Audit::now(),
    }
}

#[tokio::test]
async fn get_user_returns_cached_entry_without_touching_the_store() {
    let user_id = Uuid::new_v4();

    let mut cache = MockEntityCache::new();
    cache
        .expect_get_user()
        .with(eq(user_id))
        .returning(|id| Ok(Some(test_user(*id))));

    // No expectation on the user repository: a store call fails the test
    let uow = TestUnitOfWork::new();
    let service = UserManager::new(Arc::new(uow), Arc::new(cache));

    let user = service.get_user(user_id).await.unwrap();
    assert_eq!(user.id, user_id);
}

#[tokio::test]
async fn get_user_populates_cache_on_miss() {
    let user_id = Uuid::new_v4();

    let mut cache = MockEntityCache::new();
    cache.expect_get_user().returning(|_| Ok(None));
    cache
        .expect_set_user()
        .withf(move |user| user.id == user_id)
        .times(1)
        .returning(|_| Ok(()));

    let mut users = MockUserRepository::new();
    users
        .expect_get_by_id()
        .with(eq(user_id))
        .times(1)
        .returning(|id| Ok(test_user(id)));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::new()
    };
    let service = UserManager::new(Arc::new(uow), Arc::new(cache));

    let user = service.get_user(user_id).await.unwrap();
    assert_eq!(user.id, user_id);
}

#[tokio::test]
async fn get_user_treats_cache_failure_as_miss() {
    let user_id = Uuid::new_v4();

    let mut cache = MockEntityCache::new();
    cache
        .expect_get_user()
        .returning(|_| Err(AppError::cache("connection refused")));
    cache.expect_set_user().returning(|_| Ok(()));

    let mut users = MockUserRepository::new();
    users
        .expect_get_by_id()
        .times(1)
        .returning(|id| Ok(test_user(id)));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::new()
    };
    let service = UserManager::new(Arc::new(uow), Arc::new(cache));

    assert!(service.get_user(user_id).await.is_ok());
}

#[tokio::test]
async fn get_user_not_found_propagates() {
    let user_id = Uuid::new_v4();

    let mut cache = MockEntityCache::new();
    cache.expect_get_user().returning(|_| Ok(None));

    let mut users = MockUserRepository::new();
    users
        .expect_get_by_id()
        .returning(|_| Err(AppError::NotFound));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::new()
    };
    let service = UserManager::new(Arc::new(uow), Arc::new(cache));

    let result = service.get_user(user_id).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn update_user_invalidates_cached_entry() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_update()
        .returning(|user| Ok(user));

    let mut cache = MockEntityCache::new();
    cache
        .expect_invalidate_user()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(()));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::new()
    };
    let service = UserManager::new(Arc::new(uow), Arc::new(cache));

    let updated = service.update_user(test_user(user_id)).await.unwrap();
    assert_eq!(updated.id, user_id);
}

#[tokio::test]
async fn delete_user_deactivates_sessions_and_invalidates_cache() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_delete()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(()));

    let mut sessions = MockSessionRepository::new();
    sessions
        .expect_deactivate_by_user_id()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(2));

    let mut cache = MockEntityCache::new();
    cache
        .expect_invalidate_user()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(()));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        sessions: Arc::new(sessions),
        ..TestUnitOfWork::new()
    };
    let service = UserManager::new(Arc::new(uow), Arc::new(cache));

    assert!(service.delete_user(user_id).await.is_ok());
}

#[tokio::test]
async fn create_user_conflict_propagates() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .returning(|_| Err(AppError::conflict("email")));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..TestUnitOfWork::new()
    };
    let service = UserManager::new(Arc::new(uow), Arc::new(MockEntityCache::new()));

    let result = service.create_user(test_user(Uuid::new_v4())).await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}
