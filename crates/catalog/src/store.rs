use crate::{
    command::{CreateCourseCommand, CreateInstanceCommand},
    error::{CatalogError, CatalogResult},
    query::InstanceFilter,
    repository::Catalog,
};
use async_trait::async_trait;
use models::{Course, CourseId, CourseInstance, InstanceKey};
use std::sync::{Mutex, MutexGuard};

/// The durable store that owns courses and instances.
///
/// Implementations are expected to enforce the same invariants as
/// [`crate::guard::CatalogGuard`] and report violations with the matching
/// [`CatalogError`] kind; the store's answer is final.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list_courses(&self) -> CatalogResult<Vec<Course>>;
    async fn get_course(&self, id: &CourseId) -> CatalogResult<Course>;
    async fn create_course(&self, course: &Course) -> CatalogResult<Course>;
    async fn delete_course(&self, id: &CourseId) -> CatalogResult<()>;

    /// Instances in store order, with the course snapshot embedded when known
    async fn list_instances(&self, filter: &InstanceFilter) -> CatalogResult<Vec<CourseInstance>>;
    async fn get_instance(&self, key: &InstanceKey) -> CatalogResult<CourseInstance>;
    async fn create_instance(&self, key: &InstanceKey) -> CatalogResult<CourseInstance>;
    async fn delete_instance(&self, key: &InstanceKey) -> CatalogResult<()>;
}

/// A store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Catalog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> CatalogResult<MutexGuard<'_, Catalog>> {
        self.state
            .lock()
            .map_err(|_| CatalogError::transport("memory store lock poisoned", 500))
    }

    fn with_course(catalog: &Catalog, mut instance: CourseInstance) -> CourseInstance {
        instance.course = catalog.course(&instance.course_id).cloned();
        instance
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_courses(&self) -> CatalogResult<Vec<Course>> {
        Ok(self.state()?.courses().to_vec())
    }

    async fn get_course(&self, id: &CourseId) -> CatalogResult<Course> {
        self.state()?
            .course(id)
            .cloned()
            .ok_or_else(|| CatalogError::course_not_found(id))
    }

    async fn create_course(&self, course: &Course) -> CatalogResult<Course> {
        let mut state = self.state()?;
        let course = state
            .guard()
            .validate_create_course(&CreateCourseCommand::from(course))?;

        state.upsert_course(course.clone());
        Ok(course)
    }

    async fn delete_course(&self, id: &CourseId) -> CatalogResult<()> {
        let mut state = self.state()?;
        if state.course(id).is_none() {
            return Err(CatalogError::course_not_found(id));
        }
        state.guard().check_delete_course(id)?;

        state.remove_course(id);
        Ok(())
    }

    async fn list_instances(&self, filter: &InstanceFilter) -> CatalogResult<Vec<CourseInstance>> {
        let state = self.state()?;
        Ok(state
            .filter_instances(filter)
            .into_iter()
            .map(|i| Self::with_course(&state, i.clone()))
            .collect())
    }

    async fn get_instance(&self, key: &InstanceKey) -> CatalogResult<CourseInstance> {
        let state = self.state()?;
        state
            .instance(key)
            .map(|i| Self::with_course(&state, i.clone()))
            .ok_or_else(|| CatalogError::instance_not_found(key))
    }

    async fn create_instance(&self, key: &InstanceKey) -> CatalogResult<CourseInstance> {
        let mut state = self.state()?;
        let command =
            CreateInstanceCommand::new(key.course_id.as_str(), key.year, key.semester);
        let key = state.guard().validate_instance_key(&command)?;

        let instance = CourseInstance::new(key);
        state.upsert_instance(instance.clone());
        Ok(Self::with_course(&state, instance))
    }

    async fn delete_instance(&self, key: &InstanceKey) -> CatalogResult<()> {
        self.state()?
            .remove_instance(key)
            .map(|_| ())
            .ok_or_else(|| CatalogError::instance_not_found(key))
    }
}
