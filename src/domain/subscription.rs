//! Subscription domain entity and billing enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Audit;

const PLAN_FREE: &str = "free";
const PLAN_MONTHLY: &str = "monthly";
const PLAN_YEARLY: &str = "yearly";

/// Subscription plan enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Free,
    Monthly,
    Yearly,
}

impl From<&str> for SubscriptionPlan {
    fn from(s: &str) -> Self {
        match s {
            PLAN_MONTHLY => SubscriptionPlan::Monthly,
            PLAN_YEARLY => SubscriptionPlan::Yearly,
            _ => SubscriptionPlan::Free,
        }
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionPlan::Free => write!(f, "{}", PLAN_FREE),
            SubscriptionPlan::Monthly => write!(f, "{}", PLAN_MONTHLY),
            SubscriptionPlan::Yearly => write!(f, "{}", PLAN_YEARLY),
        }
    }
}

const STATUS_ACTIVE: &str = "active";
const STATUS_TRIALING: &str = "trialing";
const STATUS_PAST_DUE: &str = "past_due";
const STATUS_CANCELED: &str = "canceled";
const STATUS_REVOKED: &str = "revoked";

/// Subscription status enumeration.
///
/// Transitions are driven by external billing events; this layer stores
/// the reported state and never re-derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Revoked,
}

impl From<&str> for SubscriptionStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_ACTIVE => SubscriptionStatus::Active,
            STATUS_TRIALING => SubscriptionStatus::Trialing,
            STATUS_PAST_DUE => SubscriptionStatus::PastDue,
            STATUS_REVOKED => SubscriptionStatus::Revoked,
            _ => SubscriptionStatus::Canceled,
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubscriptionStatus::Active => STATUS_ACTIVE,
            SubscriptionStatus::Trialing => STATUS_TRIALING,
            SubscriptionStatus::PastDue => STATUS_PAST_DUE,
            SubscriptionStatus::Canceled => STATUS_CANCELED,
            SubscriptionStatus::Revoked => STATUS_REVOKED,
        };
        write!(f, "{}", s)
    }
}

/// Subscription domain entity (at most one row per user)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub cancel_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Subscription {
    /// New free-plan subscription for a user
    pub fn free(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            plan: SubscriptionPlan::Free,
            status: SubscriptionStatus::Active,
            stripe_customer_id: None,
            stripe_subscription_id: None,
            current_period_start: None,
            current_period_end: None,
            trial_ends_at: None,
            cancel_at: None,
            canceled_at: None,
            revoked_at: None,
            audit: Audit::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_round_trips_through_strings() {
        for plan in [
            SubscriptionPlan::Free,
            SubscriptionPlan::Monthly,
            SubscriptionPlan::Yearly,
        ] {
            assert_eq!(SubscriptionPlan::from(plan.to_string().as_str()), plan);
        }
    }

    #[test]
    fn unknown_plan_string_defaults_to_free() {
        assert_eq!(SubscriptionPlan::from("platinum"), SubscriptionPlan::Free);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            SubscriptionStatus::Active,
            SubscriptionStatus::Trialing,
            SubscriptionStatus::PastDue,
            SubscriptionStatus::Canceled,
            SubscriptionStatus::Revoked,
        ] {
            assert_eq!(
                SubscriptionStatus::from(status.to_string().as_str()),
                status
            );
        }
    }
}
