//! Redis cache implementation.
//!
//! Cache-aside wrapper with JSON payloads, pattern-based bulk
//! invalidation, and deterministic per-entity key derivation. The store
//! remains the source of truth: cache failures degrade availability,
//! never correctness.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::config::{
    Config, CACHE_PREFIX_CURRICULUM, CACHE_PREFIX_USER, CACHE_PREFIX_USER_CURRICULA,
};
use crate::domain::{Curriculum, User};
use crate::errors::{AppError, AppResult};
use crate::types::{Paginated, Sorting};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

// =============================================================================
// Key derivation
// =============================================================================
//
// Pure functions from (entity type, identifier) to key string, centralized
// so population and invalidation never drift apart.

/// Cache key for a single user
pub fn user_key(id: &Uuid) -> String {
    format!("{}{}", CACHE_PREFIX_USER, id)
}

/// Cache key for a single curriculum
pub fn curriculum_key(id: &Uuid) -> String {
    format!("{}{}", CACHE_PREFIX_CURRICULUM, id)
}

/// Cache key for one page of a user's curriculum list view
pub fn user_curricula_key(
    user_id: &Uuid,
    page: u64,
    per_page: u64,
    sorting: &Sorting,
) -> String {
    format!(
        "{}{}:{}:{}:{}:{}",
        CACHE_PREFIX_USER_CURRICULA,
        user_id,
        page,
        per_page,
        sorting.field,
        sorting.order.as_str()
    )
}

/// Glob pattern covering every cached list view of a user's curricula
pub fn user_curricula_pattern(user_id: &Uuid) -> String {
    format!("{}{}:*", CACHE_PREFIX_USER_CURRICULA, user_id)
}

// =============================================================================
// Typed cache seam
// =============================================================================

/// Per-entity cache operations.
///
/// Monomorphic so services can depend on a mockable trait; `Cache`
/// implements it on top of the generic operations below.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EntityCache: Send + Sync {
    async fn get_user(&self, id: &Uuid) -> AppResult<Option<User>>;
    async fn set_user(&self, user: &User) -> AppResult<()>;
    async fn invalidate_user(&self, id: &Uuid) -> AppResult<()>;

    async fn get_curriculum(&self, id: &Uuid) -> AppResult<Option<Curriculum>>;
    async fn set_curriculum(&self, curriculum: &Curriculum) -> AppResult<()>;
    async fn invalidate_curriculum(&self, id: &Uuid) -> AppResult<()>;

    async fn get_user_curricula(
        &self,
        user_id: &Uuid,
        page: u64,
        per_page: u64,
        sorting: &Sorting,
    ) -> AppResult<Option<Paginated<Curriculum>>>;
    async fn set_user_curricula(
        &self,
        user_id: &Uuid,
        page: u64,
        per_page: u64,
        sorting: &Sorting,
        data: &Paginated<Curriculum>,
    ) -> AppResult<()>;
    /// Drop every cached list view for the user
    async fn invalidate_user_curricula(&self, user_id: &Uuid) -> AppResult<u64>;
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    default_ttl: u64,
}

impl Cache {
    /// Connect to Redis, returning an error instead of panicking so the
    /// embedder decides whether a missing cache is fatal.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self {
            connection,
            default_ttl: config.cache_ttl_seconds,
        })
    }

    /// Get the connection manager for direct Redis operations.
    pub fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    /// Get a value from cache.
    ///
    /// A miss (key absent) is `Ok(None)`, never an error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json)
                    .map_err(|e| AppError::Deserialization(e.to_string()))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with default TTL.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Set a value in cache with custom TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json =
            serde_json::to_string(value).map_err(|e| AppError::Serialization(e.to_string()))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Delete a value from cache. Absence is not an error.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }

    /// Delete all keys matching a glob pattern, returning how many were
    /// matched. Zero matches deletes nothing silently.
    ///
    /// Uses UNLINK for non-blocking deletion (Redis 4.0+), falling back
    /// to DEL when UNLINK is unavailable.
    pub async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        let mut conn = self.connection.clone();
        let keys: Vec<String> = conn.keys(pattern).await.map_err(cache_error)?;

        if keys.is_empty() {
            return Ok(0);
        }

        let count = keys.len() as u64;

        let deleted: i64 = redis::cmd("UNLINK")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .unwrap_or(0);

        if deleted == 0 {
            let _: i64 = conn.del(&keys).await.map_err(cache_error)?;
        }

        Ok(count)
    }
}

#[async_trait]
impl EntityCache for Cache {
    async fn get_user(&self, id: &Uuid) -> AppResult<Option<User>> {
        self.get(&user_key(id)).await
    }

    async fn set_user(&self, user: &User) -> AppResult<()> {
        self.set(&user_key(&user.id), user).await
    }

    async fn invalidate_user(&self, id: &Uuid) -> AppResult<()> {
        self.delete(&user_key(id)).await
    }

    async fn get_curriculum(&self, id: &Uuid) -> AppResult<Option<Curriculum>> {
        self.get(&curriculum_key(id)).await
    }

    async fn set_curriculum(&self, curriculum: &Curriculum) -> AppResult<()> {
        self.set(&curriculum_key(&curriculum.id), curriculum).await
    }

    async fn invalidate_curriculum(&self, id: &Uuid) -> AppResult<()> {
        self.delete(&curriculum_key(id)).await
    }

    async fn get_user_curricula(
        &self,
        user_id: &Uuid,
        page: u64,
        per_page: u64,
        sorting: &Sorting,
    ) -> AppResult<Option<Paginated<Curriculum>>> {
        self.get(&user_curricula_key(user_id, page, per_page, sorting))
            .await
    }

    async fn set_user_curricula(
        &self,
        user_id: &Uuid,
        page: u64,
        per_page: u64,
        sorting: &Sorting,
        data: &Paginated<Curriculum>,
    ) -> AppResult<()> {
        self.set(&user_curricula_key(user_id, page, per_page, sorting), data)
            .await
    }

    async fn invalidate_user_curricula(&self, user_id: &Uuid) -> AppResult<u64> {
        self.delete_pattern(&user_curricula_pattern(user_id)).await
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::cache(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortOrder;

    #[test]
    fn entity_keys_are_namespaced_by_type() {
        let id = Uuid::nil();
        assert_eq!(
            user_key(&id),
            "user:00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            curriculum_key(&id),
            "curriculum:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn list_keys_fall_under_the_invalidation_pattern() {
        let user_id = Uuid::new_v4();
        let sorting = Sorting {
            field: "created_at".into(),
            order: SortOrder::Desc,
        };

        let key = user_curricula_key(&user_id, 2, 10, &sorting);
        let pattern = user_curricula_pattern(&user_id);

        let prefix = pattern.trim_end_matches('*');
        assert!(key.starts_with(prefix));
        assert!(key.ends_with(":2:10:created_at:desc"));
    }

    #[test]
    fn list_keys_differ_per_page_and_sort() {
        let user_id = Uuid::new_v4();
        let newest = Sorting {
            field: "created_at".into(),
            order: SortOrder::Desc,
        };
        let oldest = Sorting {
            field: "created_at".into(),
            order: SortOrder::Asc,
        };

        let a = user_curricula_key(&user_id, 1, 10, &newest);
        let b = user_curricula_key(&user_id, 2, 10, &newest);
        let c = user_curricula_key(&user_id, 1, 10, &oldest);

        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
