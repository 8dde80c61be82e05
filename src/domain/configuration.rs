//! Per-user configuration entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Audit;
use crate::config::DEFAULT_LANGUAGE;

/// User configuration (exactly one row per user)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub language: String,
    pub newsletter: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Configuration {
    /// Default configuration for a newly registered user
    pub fn default_for(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            language: DEFAULT_LANGUAGE.to_string(),
            newsletter: false,
            audit: Audit::now(),
        }
    }
}
