use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Instance listing filters and sorts by period
        manager
            .create_index(
                Index::create()
                    .name("idx_course_instances_period")
                    .table(CourseInstances::Table)
                    .col(CourseInstances::Year)
                    .col(CourseInstances::Semester)
                    .to_owned(),
            )
            .await?;

        // Reverse lookup for "which courses require X"
        manager
            .create_index(
                Index::create()
                    .name("idx_course_prerequisites_prerequisite_id")
                    .table(CoursePrerequisites::Table)
                    .col(CoursePrerequisites::PrerequisiteId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_prerequisites_prerequisite_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_course_instances_period").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum CourseInstances {
    Table,
    Year,
    Semester,
}

#[derive(Iden)]
enum CoursePrerequisites {
    Table,
    PrerequisiteId,
}
