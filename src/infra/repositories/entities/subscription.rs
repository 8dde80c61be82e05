//! Subscription database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Audit, Subscription, SubscriptionPlan, SubscriptionStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub plan: String,
    pub status: String,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub current_period_start: Option<DateTimeUtc>,
    pub current_period_end: Option<DateTimeUtc>,
    pub trial_ends_at: Option<DateTimeUtc>,
    pub cancel_at: Option<DateTimeUtc>,
    pub canceled_at: Option<DateTimeUtc>,
    pub revoked_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Subscription {
    fn from(model: Model) -> Self {
        Subscription {
            id: model.id,
            user_id: model.user_id,
            plan: SubscriptionPlan::from(model.plan.as_str()),
            status: SubscriptionStatus::from(model.status.as_str()),
            stripe_customer_id: model.stripe_customer_id,
            stripe_subscription_id: model.stripe_subscription_id,
            current_period_start: model.current_period_start,
            current_period_end: model.current_period_end,
            trial_ends_at: model.trial_ends_at,
            cancel_at: model.cancel_at,
            canceled_at: model.canceled_at,
            revoked_at: model.revoked_at,
            audit: Audit {
                created_at: model.created_at,
                updated_at: model.updated_at,
                deleted_at: model.deleted_at,
            },
        }
    }
}

impl From<&Subscription> for ActiveModel {
    fn from(subscription: &Subscription) -> Self {
        ActiveModel {
            id: Set(subscription.id),
            user_id: Set(subscription.user_id),
            plan: Set(subscription.plan.to_string()),
            status: Set(subscription.status.to_string()),
            stripe_customer_id: Set(subscription.stripe_customer_id.clone()),
            stripe_subscription_id: Set(subscription.stripe_subscription_id.clone()),
            current_period_start: Set(subscription.current_period_start),
            current_period_end: Set(subscription.current_period_end),
            trial_ends_at: Set(subscription.trial_ends_at),
            cancel_at: Set(subscription.cancel_at),
            canceled_at: Set(subscription.canceled_at),
            revoked_at: Set(subscription.revoked_at),
            created_at: Set(subscription.audit.created_at),
            updated_at: Set(subscription.audit.updated_at),
            deleted_at: Set(subscription.audit.deleted_at),
        }
    }
}
