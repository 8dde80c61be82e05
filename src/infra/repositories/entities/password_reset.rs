//! Password reset database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::PasswordReset;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "password_resets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub token: String,
    pub email: String,
    pub expires_at: DateTimeUtc,
    pub used: bool,
    pub created_at: DateTimeUtc,
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

impl From<Model> for PasswordReset {
    fn from(model: Model) -> Self {
        PasswordReset {
            id: model.id,
            user_id: model.user_id,
            token: model.token,
            email: model.email,
            expires_at: model.expires_at,
            used: model.used,
            created_at: model.created_at,
        }
    }
}

impl From<&PasswordReset> for ActiveModel {
    fn from(reset: &PasswordReset) -> Self {
        ActiveModel {
            id: Set(reset.id),
            user_id: Set(reset.user_id),
            token: Set(reset.token.clone()),
            email: Set(reset.email.clone()),
            expires_at: Set(reset.expires_at),
            used: Set(reset.used),
            created_at: Set(reset.created_at),
        }
    }
}
