//! Work entry database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Audit, Work};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "works")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub curriculum_id: Uuid,
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: Date,
    /// NULL end date means the position is ongoing
    pub end_date: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::curriculum::Entity",
        from = "Column::CurriculumId",
        to = "super::curriculum::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Curriculum,
}

impl Related<super::curriculum::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Curriculum.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Work {
    fn from(model: Model) -> Self {
        Work {
            id: model.id,
            curriculum_id: model.curriculum_id,
            company: model.company,
            position: model.position,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            audit: Audit {
                created_at: model.created_at,
                updated_at: model.updated_at,
                deleted_at: model.deleted_at,
            },
        }
    }
}

impl From<&Work> for ActiveModel {
    fn from(work: &Work) -> Self {
        ActiveModel {
            id: Set(work.id),
            curriculum_id: Set(work.curriculum_id),
            company: Set(work.company.clone()),
            position: Set(work.position.clone()),
            description: Set(work.description.clone()),
            start_date: Set(work.start_date),
            end_date: Set(work.end_date),
            created_at: Set(work.audit.created_at),
            updated_at: Set(work.audit.updated_at),
            deleted_at: Set(work.audit.deleted_at),
        }
    }
}
