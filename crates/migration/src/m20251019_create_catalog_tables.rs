use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::CourseId)
                            .string_len(7)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // prerequisite_id may name a course that does not exist yet, so only
        // the owning side is a foreign key
        manager
            .create_table(
                Table::create()
                    .table(CoursePrerequisites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoursePrerequisites::CourseId)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoursePrerequisites::PrerequisiteId)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoursePrerequisites::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(CoursePrerequisites::CourseId)
                            .col(CoursePrerequisites::PrerequisiteId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_prerequisites-course_id")
                            .from(CoursePrerequisites::Table, CoursePrerequisites::CourseId)
                            .to(Courses::Table, Courses::CourseId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseInstances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseInstances::CourseId)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseInstances::Year).integer().not_null())
                    .col(
                        ColumnDef::new(CourseInstances::Semester)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(CourseInstances::Semester).is_in([1, 2])),
                    )
                    .col(
                        ColumnDef::new(CourseInstances::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(CourseInstances::CourseId)
                            .col(CourseInstances::Year)
                            .col(CourseInstances::Semester),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course_instances-course_id")
                            .from(CourseInstances::Table, CourseInstances::CourseId)
                            .to(Courses::Table, Courses::CourseId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseInstances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CoursePrerequisites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    CourseId,
    Title,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum CoursePrerequisites {
    Table,
    CourseId,
    PrerequisiteId,
    Position,
}

#[derive(Iden)]
enum CourseInstances {
    Table,
    CourseId,
    Year,
    Semester,
    CreatedAt,
}
