use crate::{
    entities::{course, instance, prerequisite},
    error::{ServiceError, ServiceResult},
    services::convert,
};
use catalog::{CatalogError, CatalogGuard, CreateCourseCommand};
use log::{debug, info};
use models::{Course, CourseId};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

pub struct CourseService;

impl CourseService {
    /// All courses in creation order, each with its prerequisites in list order
    pub async fn list_courses<C: ConnectionTrait>(db: &C) -> Result<Vec<Course>, DbErr> {
        let (courses, prerequisites) = futures::try_join!(
            course::Entity::find()
                .order_by_asc(course::Column::CreatedAt)
                .order_by_asc(course::Column::CourseId)
                .all(db),
            prerequisite::Entity::find()
                .order_by_asc(prerequisite::Column::CourseId)
                .order_by_asc(prerequisite::Column::Position)
                .all(db),
        )?;

        convert::to_courses(courses, prerequisites)
    }

    pub async fn get_course(db: &DatabaseConnection, raw_id: &str) -> ServiceResult<Course> {
        let id: CourseId = raw_id
            .parse()
            .map_err(|_| CatalogError::course_not_found(raw_id.to_uppercase()))?;

        let row = course::Entity::find_by_id(id.as_str())
            .one(db)
            .await?
            .ok_or_else(|| CatalogError::course_not_found(&id))?;
        let prerequisites = prerequisite::Entity::find()
            .filter(prerequisite::Column::CourseId.eq(id.as_str()))
            .order_by_asc(prerequisite::Column::Position)
            .all(db)
            .await?;

        let mut courses = convert::to_courses(vec![row], prerequisites)?;
        courses
            .pop()
            .ok_or_else(|| CatalogError::course_not_found(&id).into())
    }

    /// Validates the command against the stored catalog and inserts the course
    /// with its prerequisite edges in one transaction
    pub async fn create_course(
        db: &DatabaseConnection,
        command: CreateCourseCommand,
    ) -> ServiceResult<Course> {
        let txn = db.begin().await?;

        let existing = Self::list_courses(&txn).await?;
        let course = CatalogGuard::new(&existing, &[]).validate_create_course(&command)?;

        let row = course::ActiveModel {
            course_id: Set(course.course_id.to_string()),
            title: Set(course.title.clone()),
            description: Set(course.description.clone()),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        course::Entity::insert(row)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| {
                ServiceError::on_unique_violation(e, || {
                    CatalogError::duplicate_course(&course.course_id)
                })
            })?;

        if !course.prerequisites.is_empty() {
            let edges = course
                .prerequisites
                .iter()
                .enumerate()
                .map(|(position, id)| prerequisite::ActiveModel {
                    course_id: Set(course.course_id.to_string()),
                    prerequisite_id: Set(id.to_string()),
                    position: Set(position as i32),
                });
            prerequisite::Entity::insert_many(edges)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        info!(
            "Created course {} with {} prerequisite(s)",
            course.course_id,
            course.prerequisites.len()
        );
        Ok(course)
    }

    /// Deletes a course that no other course requires and that has no
    /// scheduled instances
    pub async fn delete_course(db: &DatabaseConnection, raw_id: &str) -> ServiceResult<()> {
        let id: CourseId = raw_id
            .parse()
            .map_err(|_| CatalogError::course_not_found(raw_id.to_uppercase()))?;

        let txn = db.begin().await?;

        let courses = Self::list_courses(&txn).await?;
        if !courses.iter().any(|c| c.course_id == id) {
            return Err(CatalogError::course_not_found(&id).into());
        }
        CatalogGuard::new(&courses, &[]).check_delete_course(&id)?;

        let scheduled = instance::Entity::find()
            .filter(instance::Column::CourseId.eq(id.as_str()))
            .count(&txn)
            .await?;
        if scheduled > 0 {
            return Err(CatalogError::DependencyConflict {
                message: format!(
                    "Course {id} can't be deleted since it has {scheduled} scheduled instance(s)"
                ),
                dependents: Vec::new(),
            }
            .into());
        }

        prerequisite::Entity::delete_many()
            .filter(prerequisite::Column::CourseId.eq(id.as_str()))
            .exec(&txn)
            .await?;
        course::Entity::delete_by_id(id.as_str()).exec(&txn).await?;

        txn.commit().await?;
        debug!("Deleted course {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::ErrorKind;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn timestamp() -> sea_orm::prelude::DateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn course_row(id: &str) -> course::Model {
        course::Model {
            course_id: id.to_string(),
            title: format!("{id} title"),
            description: "About it".to_string(),
            created_at: timestamp(),
        }
    }

    fn edge(course_id: &str, prerequisite_id: &str) -> prerequisite::Model {
        prerequisite::Model {
            course_id: course_id.to_string(),
            prerequisite_id: prerequisite_id.to_string(),
            position: 0,
        }
    }

    fn kind<T: std::fmt::Debug>(result: ServiceResult<T>) -> ErrorKind {
        match result.unwrap_err() {
            ServiceError::Catalog(e) => e.kind(),
            other => panic!("expected a catalog error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_course_rejects_duplicate_before_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_row("CS101")]])
            .append_query_results([Vec::<prerequisite::Model>::new()])
            .into_connection();

        let result =
            CourseService::create_course(&db, CreateCourseCommand::new("cs101", "Intro", "Basics"))
                .await;
        assert_eq!(kind(result), ErrorKind::Duplicate);
    }

    #[tokio::test]
    async fn test_create_course_inserts_edges() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_row("CS101")]])
            .append_query_results([Vec::<prerequisite::Model>::new()])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let course = CourseService::create_course(
            &db,
            CreateCourseCommand::new("CS201", " Data Structures ", "Trees")
                .with_prerequisites(["cs101"]),
        )
        .await
        .unwrap();

        assert_eq!(course.course_id, "CS201");
        assert_eq!(course.title, "Data Structures");
        assert_eq!(course.prerequisites, vec!["CS101".parse::<CourseId>().unwrap()]);
    }

    #[tokio::test]
    async fn test_delete_course_blocked_by_dependent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_row("CS101"), course_row("CS201")]])
            .append_query_results([vec![edge("CS201", "CS101")]])
            .into_connection();

        let result = CourseService::delete_course(&db, "CS101").await;
        assert_eq!(kind(result), ErrorKind::DependencyConflict);
    }

    #[tokio::test]
    async fn test_delete_course_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<course::Model>::new()])
            .append_query_results([Vec::<prerequisite::Model>::new()])
            .into_connection();

        assert_eq!(
            kind(CourseService::delete_course(&db, "CS999").await),
            ErrorKind::NotFound
        );
        assert_eq!(
            kind(CourseService::delete_course(&db, "not an id").await),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_get_course() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_row("CS201")]])
            .append_query_results([vec![edge("CS201", "CS101")]])
            .into_connection();

        let course = CourseService::get_course(&db, "cs201").await.unwrap();
        assert_eq!(course.course_id, "CS201");
        assert_eq!(course.prerequisites.len(), 1);
    }
}
