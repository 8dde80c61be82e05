//! Curriculum database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Audit, Curriculum};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "curriculums")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    pub skills: String,
    pub job_description: String,
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
    #[sea_orm(has_many = "super::work::Entity")]
    Works,
    #[sea_orm(has_many = "super::education::Entity")]
    Educations,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Works.def()
    }
}

impl Related<super::education::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Educations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// Nested works/educations are loaded separately by the repository.
impl From<Model> for Curriculum {
    fn from(model: Model) -> Self {
        Curriculum {
            id: model.id,
            user_id: model.user_id,
            full_name: model.full_name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            summary: model.summary,
            skills: model.skills,
            job_description: model.job_description,
            works: Vec::new(),
            educations: Vec::new(),
            audit: Audit {
                created_at: model.created_at,
                updated_at: model.updated_at,
                deleted_at: model.deleted_at,
            },
        }
    }
}

/// Build a full active model from a domain entity (full-record replace)
impl From<&Curriculum> for ActiveModel {
    fn from(curriculum: &Curriculum) -> Self {
        ActiveModel {
            id: Set(curriculum.id),
            user_id: Set(curriculum.user_id),
            full_name: Set(curriculum.full_name.clone()),
            email: Set(curriculum.email.clone()),
            phone: Set(curriculum.phone.clone()),
            address: Set(curriculum.address.clone()),
            summary: Set(curriculum.summary.clone()),
            skills: Set(curriculum.skills.clone()),
            job_description: Set(curriculum.job_description.clone()),
            created_at: Set(curriculum.audit.created_at),
            updated_at: Set(curriculum.audit.updated_at),
            deleted_at: Set(curriculum.audit.deleted_at),
        }
    }
}
