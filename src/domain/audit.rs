//! Shared audit timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation/update/soft-delete timestamps shared by most entities.
///
/// Embedded by value; `deleted_at` is the soft-delete tombstone
/// (None = active, Some = deleted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Audit {
    /// Fresh audit block for a newly created record
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Mark as soft-deleted
    pub fn tombstone(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Default for Audit {
    fn default() -> Self {
        Self::now()
    }
}
