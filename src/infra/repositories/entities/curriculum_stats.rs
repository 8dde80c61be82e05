//! Curriculum creation stats database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::CurriculumCreationStats;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "curriculum_creation_stats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub total_creations: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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

impl From<Model> for CurriculumCreationStats {
    fn from(model: Model) -> Self {
        CurriculumCreationStats {
            id: model.id,
            user_id: model.user_id,
            total_creations: model.total_creations,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&CurriculumCreationStats> for ActiveModel {
    fn from(stats: &CurriculumCreationStats) -> Self {
        ActiveModel {
            id: Set(stats.id),
            user_id: Set(stats.user_id),
            total_creations: Set(stats.total_creations),
            created_at: Set(stats.created_at),
            updated_at: Set(stats.updated_at),
        }
    }
}
