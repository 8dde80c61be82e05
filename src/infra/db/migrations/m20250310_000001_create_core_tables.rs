//! Migration: Create users, configurations and the curriculum tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_deleted_at")
                    .table(Users::Table)
                    .col(Users::DeletedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Configurations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Configurations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Configurations::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Configurations::Language).string().not_null())
                    .col(
                        ColumnDef::new(Configurations::Newsletter)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Configurations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Configurations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Configurations::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_configurations_user")
                            .from(Configurations::Table, Configurations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Curriculums::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Curriculums::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Curriculums::UserId).uuid().not_null())
                    .col(ColumnDef::new(Curriculums::FullName).string().not_null())
                    .col(ColumnDef::new(Curriculums::Email).string().not_null())
                    .col(ColumnDef::new(Curriculums::Phone).string().not_null())
                    .col(ColumnDef::new(Curriculums::Address).string().not_null())
                    .col(ColumnDef::new(Curriculums::Summary).text().not_null())
                    .col(ColumnDef::new(Curriculums::Skills).text().not_null())
                    .col(
                        ColumnDef::new(Curriculums::JobDescription)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Curriculums::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Curriculums::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Curriculums::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_curriculums_user")
                            .from(Curriculums::Table, Curriculums::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_curriculums_user_id")
                    .table(Curriculums::Table)
                    .col(Curriculums::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Works::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Works::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Works::CurriculumId).uuid().not_null())
                    .col(ColumnDef::new(Works::Company).string().not_null())
                    .col(ColumnDef::new(Works::Position).string().not_null())
                    .col(ColumnDef::new(Works::Description).text().not_null())
                    .col(ColumnDef::new(Works::StartDate).date().not_null())
                    .col(ColumnDef::new(Works::EndDate).date().null())
                    .col(
                        ColumnDef::new(Works::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Works::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Works::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_works_curriculum")
                            .from(Works::Table, Works::CurriculumId)
                            .to(Curriculums::Table, Curriculums::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_works_curriculum_id")
                    .table(Works::Table)
                    .col(Works::CurriculumId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Educations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Educations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Educations::CurriculumId).uuid().not_null())
                    .col(ColumnDef::new(Educations::Institution).string().not_null())
                    .col(ColumnDef::new(Educations::Degree).string().not_null())
                    .col(
                        ColumnDef::new(Educations::FieldOfStudy)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Educations::StartDate).date().not_null())
                    .col(ColumnDef::new(Educations::EndDate).date().null())
                    .col(
                        ColumnDef::new(Educations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Educations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Educations::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_educations_curriculum")
                            .from(Educations::Table, Educations::CurriculumId)
                            .to(Curriculums::Table, Curriculums::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_educations_curriculum_id")
                    .table(Educations::Table)
                    .col(Educations::CurriculumId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Educations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Works::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Curriculums::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Configurations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    FullName,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Configurations {
    Table,
    Id,
    UserId,
    Language,
    Newsletter,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Curriculums {
    Table,
    Id,
    UserId,
    FullName,
    Email,
    Phone,
    Address,
    Summary,
    Skills,
    JobDescription,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Works {
    Table,
    Id,
    CurriculumId,
    Company,
    Position,
    Description,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Educations {
    Table,
    Id,
    CurriculumId,
    Institution,
    Degree,
    FieldOfStudy,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
