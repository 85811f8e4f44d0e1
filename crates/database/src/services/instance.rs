use crate::{
    entities::instance,
    error::{ServiceError, ServiceResult},
    services::{convert, course::CourseService},
};
use catalog::{CatalogError, CatalogGuard, CreateInstanceCommand, InstanceFilter};
use log::{debug, info};
use models::{CourseId, CourseInstance, InstanceKey};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

pub struct InstanceService;

impl InstanceService {
    fn key_columns(key: &InstanceKey) -> (String, i32, i16) {
        (
            key.course_id.to_string(),
            i32::from(u16::from(key.year)),
            i16::from(key.semester.number()),
        )
    }

    /// Instances matching the filter, ordered by year, semester and course,
    /// each carrying a snapshot of its course
    pub async fn list_instances(
        db: &DatabaseConnection,
        filter: &InstanceFilter,
    ) -> ServiceResult<Vec<CourseInstance>> {
        let mut condition = Condition::all();
        if let Some(year) = filter.year {
            condition = condition.add(instance::Column::Year.eq(i32::from(u16::from(year))));
        }
        if let Some(semester) = filter.semester {
            condition = condition.add(instance::Column::Semester.eq(i16::from(semester.number())));
        }

        let (rows, courses) = futures::try_join!(
            instance::Entity::find()
                .filter(condition)
                .order_by_asc(instance::Column::Year)
                .order_by_asc(instance::Column::Semester)
                .order_by_asc(instance::Column::CourseId)
                .all(db),
            CourseService::list_courses(db),
        )?;

        let instances = rows
            .iter()
            .map(|row| convert::to_instance(row, &courses))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(instances)
    }

    pub async fn get_instance(
        db: &DatabaseConnection,
        key: &InstanceKey,
    ) -> ServiceResult<CourseInstance> {
        let row = instance::Entity::find_by_id(Self::key_columns(key))
            .one(db)
            .await?
            .ok_or_else(|| CatalogError::instance_not_found(key))?;

        let courses = match CourseService::get_course(db, key.course_id.as_str()).await {
            Ok(course) => vec![course],
            Err(ServiceError::Catalog(_)) => Vec::new(),
            Err(e) => return Err(e),
        };
        Ok(convert::to_instance(&row, &courses)?)
    }

    /// Schedules a course for a (year, semester) slot that is still free
    pub async fn create_instance(
        db: &DatabaseConnection,
        command: CreateInstanceCommand,
    ) -> ServiceResult<CourseInstance> {
        let txn = db.begin().await?;

        let courses = CourseService::list_courses(&txn).await?;
        let existing = match command.course_id.trim().parse::<CourseId>() {
            Ok(id) => instance::Entity::find()
                .filter(instance::Column::CourseId.eq(id.as_str()))
                .all(&txn)
                .await?
                .iter()
                .map(convert::to_key)
                .map(|key| key.map(CourseInstance::new))
                .collect::<Result<Vec<_>, _>>()?,
            Err(_) => Vec::new(),
        };

        let key = CatalogGuard::new(&courses, &existing).validate_instance_key(&command)?;
        let (course_id, year, semester) = Self::key_columns(&key);
        let row = instance::ActiveModel {
            course_id: Set(course_id),
            year: Set(year),
            semester: Set(semester),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        instance::Entity::insert(row)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| {
                ServiceError::on_unique_violation(e, || CatalogError::duplicate_instance(&key))
            })?;

        txn.commit().await?;
        info!("Scheduled course instance {key}");

        let mut created = CourseInstance::new(key);
        created.course = courses
            .into_iter()
            .find(|c| c.course_id == created.course_id);
        Ok(created)
    }

    pub async fn delete_instance(db: &DatabaseConnection, key: &InstanceKey) -> ServiceResult<()> {
        let result = instance::Entity::delete_by_id(Self::key_columns(key))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::instance_not_found(key).into());
        }

        debug!("Removed course instance {key}");
        Ok(())
    }
}
