//! Usage accounting entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime curriculum creation counter for a user.
///
/// The counter only increases; deleting curriculums does not touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumCreationStats {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_creations: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CurriculumCreationStats {
    /// First row for a user, created lazily on the first increment
    pub fn first(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            total_creations: 1,
            created_at: now,
            updated_at: now,
        }
    }
}
