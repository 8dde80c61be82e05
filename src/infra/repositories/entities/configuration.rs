//! Configuration database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Audit, Configuration};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "configurations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub language: String,
    pub newsletter: bool,
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

impl From<Model> for Configuration {
    fn from(model: Model) -> Self {
        Configuration {
            id: model.id,
            user_id: model.user_id,
            language: model.language,
            newsletter: model.newsletter,
            audit: Audit {
                created_at: model.created_at,
                updated_at: model.updated_at,
                deleted_at: model.deleted_at,
            },
        }
    }
}

impl From<&Configuration> for ActiveModel {
    fn from(configuration: &Configuration) -> Self {
        ActiveModel {
            id: Set(configuration.id),
            user_id: Set(configuration.user_id),
            language: Set(configuration.language.clone()),
            newsletter: Set(configuration.newsletter),
            created_at: Set(configuration.audit.created_at),
            updated_at: Set(configuration.audit.updated_at),
            deleted_at: Set(configuration.audit.deleted_at),
        }
    }
}
