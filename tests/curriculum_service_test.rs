//! Curriculum service unit tests.
//!
//! The transactional create path needs a live database transaction and is
//! exercised at the repository level; these tests cover the cache-aside
//! read/invalidate discipline and input validation.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use mockall::predicate::eq;
use uuid::Uuid;

use curricula::domain::{Audit, Curriculum, Work};
use curricula::errors::AppError;
use curricula::infra::{MockCurriculumRepository, MockEntityCache, MockStatsRepository};
use curricula::services::{CurriculumManager, CurriculumService};
use curricula::types::{Paginated, PaginationParams};

use common::TestUnitOfWork;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_curriculum(id: Uuid, user_id: Uuid) -> Curriculum {
    Curriculum {
        id,
        user_id,
        full_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "+1 555 0100".to_string(),
        address: "Lisbon".to_string(),
        summary: "Backend engineer".to_string(),
        skills: "Rust, PostgreSQL, Redis".to_string(),
        job_description: "Staff engineer".to_string(),
        works: vec![],
        educations: vec![],
        audit: Audit::now(),
    }
}

fn work_entry(curriculum_id: Uuid, start: NaiveDate, end: Option<NaiveDate>) -> Work {
    Work {
        id: Uuid::new_v4(),
        curriculum_id,
        company: "Acme".to_string(),
        position: "Engineer".to_string(),
        description: String::new(),
        start_date: start,
        end_date: end,
        audit: Audit::now(),
    }
}

#[tokio::test]
async fn get_curriculum_returns_cached_entry_without_touching_the_store() {
    let id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let mut cache = MockEntityCache::new();
    cache
        .expect_get_curriculum()
        .with(eq(id))
        .returning(move |id| Ok(Some(test_curriculum(*id, user_id))));

    let uow = TestUnitOfWork::new();
    let service = CurriculumManager::new(Arc::new(uow), Arc::new(cache));

    let curriculum = service.get_curriculum(id).await.unwrap();
    assert_eq!(curriculum.id, id);
}

#[tokio::test]
async fn get_curriculum_populates_cache_on_miss() {
    let id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let mut cache = MockEntityCache::new();
    cache.expect_get_curriculum().returning(|_| Ok(None));
    cache
        .expect_set_curriculum()
        .withf(move |c| c.id == id)
        .times(1)
        .returning(|_| Ok(()));

    let mut curricula = MockCurriculumRepository::new();
    curricula
        .expect_get_by_id()
        .with(eq(id))
        .times(1)
        .returning(move |id| Ok(test_curriculum(id, user_id)));

    let uow = TestUnitOfWork {
        curricula: Arc::new(curricula),
        ..TestUnitOfWork::new()
    };
    let service = CurriculumManager::new(Arc::new(uow), Arc::new(cache));

    let curriculum = service.get_curriculum(id).await.unwrap();
    assert_eq!(curriculum.user_id, user_id);
}

#[tokio::test]
async fn list_curricula_normalizes_unknown_sort_before_hitting_store_and_cache() {
    let user_id = Uuid::new_v4();
    let params = PaginationParams::new(2, 10);

    let mut cache = MockEntityCache::new();
    // The derived cache key must use the corrected sort, not the raw input
    cache
        .expect_get_user_curricula()
        .withf(move |uid, page, per_page, sorting| {
            *uid == user_id
                && *page == 2
                && *per_page == 10
                && sorting.field == "created_at"
                && sorting.order.as_str() == "desc"
        })
        .returning(|_, _, _, _| Ok(None));
    cache
        .expect_set_user_curricula()
        .withf(move |uid, _, _, sorting, page| {
            *uid == user_id && sorting.field == "created_at" && page.meta.total == 1
        })
        .times(1)
        .returning(|_, _, _, _, _| Ok(()));

    let mut curricula = MockCurriculumRepository::new();
    curricula
        .expect_list_by_user()
        .withf(move |uid, params, sort_by, order| {
            *uid == user_id
                && params.page == 2
                && sort_by.as_deref() == Some("created_at")
                && order.as_deref() == Some("desc")
        })
        .times(1)
        .returning(move |uid, params, _, _| {
            Ok(Paginated::new(
                vec![test_curriculum(Uuid::new_v4(), uid)],
                params.page,
                params.limit(),
                1,
            ))
        });

    let uow = TestUnitOfWork {
        curricula: Arc::new(curricula),
        ..TestUnitOfWork::new()
    };
    let service = CurriculumManager::new(Arc::new(uow), Arc::new(cache));

    // "magic" is not a sortable column and must silently fall back
    let page = service
        .list_curricula(
            user_id,
            &params,
            Some("magic".to_string()),
            Some("sideways".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(page.meta.page, 2);
    assert_eq!(page.data.len(), 1);
}

#[tokio::test]
async fn list_curricula_serves_cached_page() {
    let user_id = Uuid::new_v4();
    let params = PaginationParams::new(1, 10);

    let mut cache = MockEntityCache::new();
    cache
        .expect_get_user_curricula()
        .returning(move |uid, page, per_page, _| {
            Ok(Some(Paginated::new(
                vec![test_curriculum(Uuid::new_v4(), *uid)],
                page,
                per_page,
                1,
            )))
        });

    // No repository expectation: a store call fails the test
    let uow = TestUnitOfWork::new();
    let service = CurriculumManager::new(Arc::new(uow), Arc::new(cache));

    let page = service
        .list_curricula(user_id, &params, None, None)
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
}

#[tokio::test]
async fn create_curriculum_rejects_inverted_date_ranges() {
    let user_id = Uuid::new_v4();
    let mut curriculum = test_curriculum(Uuid::nil(), user_id);
    curriculum.works = vec![work_entry(
        curriculum.id,
        date(2023, 5, 1),
        Some(date(2021, 1, 1)),
    )];

    // Neither the store nor the cache may be touched
    let uow = TestUnitOfWork::new();
    let service = CurriculumManager::new(Arc::new(uow), Arc::new(MockEntityCache::new()));

    let result = service.create_curriculum(curriculum).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn update_curriculum_invalidates_entry_and_list_views() {
    let id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let mut curricula = MockCurriculumRepository::new();
    curricula.expect_update().returning(|c| Ok(c));

    let mut cache = MockEntityCache::new();
    cache
        .expect_invalidate_curriculum()
        .with(eq(id))
        .times(1)
        .returning(|_| Ok(()));
    cache
        .expect_invalidate_user_curricula()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(2));

    let uow = TestUnitOfWork {
        curricula: Arc::new(curricula),
        ..TestUnitOfWork::new()
    };
    let service = CurriculumManager::new(Arc::new(uow), Arc::new(cache));

    let updated = service
        .update_curriculum(test_curriculum(id, user_id))
        .await
        .unwrap();
    assert_eq!(updated.id, id);
}

#[tokio::test]
async fn delete_curriculum_invalidates_entry_and_list_views() {
    let id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let mut curricula = MockCurriculumRepository::new();
    curricula
        .expect_get_by_id()
        .with(eq(id))
        .returning(move |id| Ok(test_curriculum(id, user_id)));
    curricula
        .expect_delete()
        .with(eq(id))
        .times(1)
        .returning(|_| Ok(()));

    let mut cache = MockEntityCache::new();
    cache
        .expect_invalidate_curriculum()
        .with(eq(id))
        .times(1)
        .returning(|_| Ok(()));
    cache
        .expect_invalidate_user_curricula()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(0));

    let uow = TestUnitOfWork {
        curricula: Arc::new(curricula),
        ..TestUnitOfWork::new()
    };
    let service = CurriculumManager::new(Arc::new(uow), Arc::new(cache));

    assert!(service.delete_curriculum(id).await.is_ok());
}

#[tokio::test]
async fn creation_count_reads_zero_for_absent_row() {
    let user_id = Uuid::new_v4();

    let mut stats = MockStatsRepository::new();
    stats
        .expect_get_by_user_id()
        .with(eq(user_id))
        .returning(|_| Ok(0));

    let uow = TestUnitOfWork {
        stats: Arc::new(stats),
        ..TestUnitOfWork::new()
    };
    let service = CurriculumManager::new(Arc::new(uow), Arc::new(MockEntityCache::new()));

    assert_eq!(service.creation_count(user_id).await.unwrap(), 0);
}
