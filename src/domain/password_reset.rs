//! Password reset token entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Password reset token.
///
/// Hard-deleted by expiry sweeps; redemption flips `used` instead of
/// removing the row so replays are detectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordReset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl PasswordReset {
    /// New unredeemed token valid for `ttl_minutes`
    pub fn new(user_id: Uuid, token: String, email: String, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            email,
            expires_at: now + Duration::minutes(ttl_minutes),
            used: false,
            created_at: now,
        }
    }

    /// A token is redeemable iff not used and not expired
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        !self.used && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_token_is_not_redeemable_even_before_expiry() {
        let mut reset =
            PasswordReset::new(Uuid::new_v4(), "tok".into(), "a@b.c".into(), 30);
        assert!(reset.is_redeemable(Utc::now()));

        reset.used = true;
        assert!(!reset.is_redeemable(Utc::now()));
    }

    #[test]
    fn expired_token_is_not_redeemable() {
        let mut reset =
            PasswordReset::new(Uuid::new_v4(), "tok".into(), "a@b.c".into(), 30);
        reset.expires_at = Utc::now() - Duration::minutes(1);
        assert!(!reset.is_redeemable(Utc::now()));
    }
}
