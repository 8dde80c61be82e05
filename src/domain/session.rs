//! Login session domain entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login session.
///
/// Sessions are never soft-deleted: logout flips `is_active`, expiry
/// sweeps remove rows outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new active session valid for `ttl_hours`
    pub fn new(user_id: Uuid, token: String, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            is_active: true,
            expires_at: now + Duration::hours(ttl_hours),
            created_at: now,
            updated_at: now,
        }
    }

    /// A session is valid iff it is active and not yet expired
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_valid() {
        let session = Session::new(Uuid::new_v4(), "tok".into(), 72);
        assert!(session.is_valid(Utc::now()));
    }

    #[test]
    fn deactivated_session_is_invalid_even_before_expiry() {
        let mut session = Session::new(Uuid::new_v4(), "tok".into(), 72);
        session.is_active = false;
        assert!(!session.is_valid(Utc::now()));
    }

    #[test]
    fn expired_session_is_invalid_even_when_active() {
        let mut session = Session::new(Uuid::new_v4(), "tok".into(), 72);
        session.expires_at = Utc::now() - Duration::minutes(1);
        assert!(!session.is_valid(Utc::now()));
    }
}
