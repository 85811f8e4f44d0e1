use crate::{
    command::{CreateCourseCommand, CreateInstanceCommand},
    error::{CatalogError, CatalogResult},
    query::{InstanceFilter, PeriodGroup},
    repository::Catalog,
    store::CourseStore,
};
use log::{debug, info, warn};
use models::{Course, CourseId, CourseInstance, InstanceKey};

/// Entry point for the presentation layer.
///
/// Every mutation is validated against the local mirror first, then sent to
/// the store. The mirror only changes after the store accepted the change, so
/// a failed call leaves it in its last known good state.
pub struct CatalogService<S> {
    store: S,
    catalog: Catalog,
}

impl<S: CourseStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            catalog: Catalog::new(),
        }
    }

    /// Builds the service and loads the mirror from the store
    pub async fn connect(store: S) -> CatalogResult<Self> {
        let mut service = Self::new(store);
        service.refresh().await?;
        Ok(service)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reloads every course and instance from the store
    pub async fn refresh(&mut self) -> CatalogResult<()> {
        let everything = InstanceFilter::default();
        let (courses, instances) = futures::try_join!(
            self.store.list_courses(),
            self.store.list_instances(&everything)
        )?;

        debug!(
            "Loaded {} courses and {} instances",
            courses.len(),
            instances.len()
        );
        self.catalog.replace(courses, instances);
        Ok(())
    }

    pub async fn create_course(&mut self, command: CreateCourseCommand) -> CatalogResult<Course> {
        let course = self.catalog.guard().validate_create_course(&command)?;
        let unknown: Vec<&CourseId> = course
            .prerequisites
            .iter()
            .filter(|p| self.catalog.course(p).is_none())
            .collect();
        if !unknown.is_empty() {
            warn!(
                "Course {} lists prerequisites missing from the catalog: {unknown:?}",
                course.course_id
            );
        }

        let created = self.store.create_course(&course).await?;
        info!("Created course {}", created.course_id);

        self.catalog.upsert_course(created.clone());
        Ok(created)
    }

    /// Deletes a course nobody requires. The store gets the final say.
    pub async fn delete_course(&mut self, id: &str) -> CatalogResult<()> {
        let id: CourseId = id
            .parse()
            .map_err(|_| CatalogError::course_not_found(id))?;
        self.catalog.guard().check_delete_course(&id)?;

        self.store.delete_course(&id).await?;
        info!("Deleted course {id}");

        self.catalog.remove_course(&id);
        Ok(())
    }

    pub async fn get_course(&self, id: &str) -> CatalogResult<Course> {
        let id: CourseId = id
            .parse()
            .map_err(|_| CatalogError::course_not_found(id))?;
        self.store.get_course(&id).await
    }

    pub async fn create_instance(
        &mut self,
        command: CreateInstanceCommand,
    ) -> CatalogResult<CourseInstance> {
        let key = self.catalog.guard().validate_instance_key(&command)?;

        let created = self.store.create_instance(&key).await?;
        info!("Scheduled {key}");

        self.catalog.upsert_instance(created.clone());
        Ok(created)
    }

    pub async fn delete_instance(&mut self, key: &InstanceKey) -> CatalogResult<()> {
        self.store.delete_instance(key).await?;
        info!("Removed instance {key}");

        if self.catalog.remove_instance(key).is_none() {
            debug!("Instance {key} was not in the local mirror");
        }
        Ok(())
    }

    pub async fn get_instance(&self, key: &InstanceKey) -> CatalogResult<CourseInstance> {
        self.store.get_instance(key).await
    }

    /// Asks the store for a filtered instance list without touching the mirror
    pub async fn list_instances(
        &self,
        filter: &InstanceFilter,
    ) -> CatalogResult<Vec<CourseInstance>> {
        self.store.list_instances(filter).await
    }

    pub fn dependents_of(&self, id: &CourseId) -> Vec<&Course> {
        self.catalog.dependents_of(id)
    }

    pub fn schedule(&self, filter: &InstanceFilter) -> Vec<PeriodGroup<'_>> {
        self.catalog.schedule(filter)
    }
}
