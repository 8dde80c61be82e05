//! User domain entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Audit;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub password_hash: String,
    pub full_name: String,
    pub is_admin: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

impl User {
    /// Create a new non-admin user
    pub fn new(email: String, password_hash: String, full_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            full_name,
            is_admin: false,
            audit: Audit::now(),
        }
    }

    /// Check if user is active (not soft-deleted)
    pub fn is_active(&self) -> bool {
        !self.audit.is_deleted()
    }
}
