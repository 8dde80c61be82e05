//! Education entry database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Audit, Education};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "educations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub curriculum_id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: Date,
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

impl From<Model> for Education {
    fn from(model: Model) -> Self {
        Education {
            id: model.id,
            curriculum_id: model.curriculum_id,
            institution: model.institution,
            degree: model.degree,
            field_of_study: model.field_of_study,
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

impl From<&Education> for ActiveModel {
    fn from(education: &Education) -> Self {
        ActiveModel {
            id: Set(education.id),
            curriculum_id: Set(education.curriculum_id),
            institution: Set(education.institution.clone()),
            degree: Set(education.degree.clone()),
            field_of_study: Set(education.field_of_study.clone()),
            start_date: Set(education.start_date),
            end_date: Set(education.end_date),
            created_at: Set(education.audit.created_at),
            updated_at: Set(education.audit.updated_at),
            deleted_at: Set(education.audit.deleted_at),
        }
    }
}
