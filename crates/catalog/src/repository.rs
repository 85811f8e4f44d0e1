use crate::{
    guard::CatalogGuard,
    query::{self, InstanceFilter, PeriodGroup},
};
use models::{Course, CourseId, CourseInstance, InstanceKey};

/// In-process mirror of the courses and instances held by the store.
///
/// Reads are public; writes are crate-private so that only the catalog
/// operations can change it, after the store has accepted the change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
    instances: Vec<CourseInstance>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn instances(&self) -> &[CourseInstance] {
        &self.instances
    }

    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| &c.course_id == id)
    }

    pub fn instance(&self, key: &InstanceKey) -> Option<&CourseInstance> {
        self.instances.iter().find(|i| i.matches(key))
    }

    pub fn guard(&self) -> CatalogGuard<'_> {
        CatalogGuard::new(&self.courses, &self.instances)
    }

    pub fn dependents_of(&self, id: &CourseId) -> Vec<&Course> {
        query::dependents_of(&self.courses, id)
    }

    pub fn can_delete_course(&self, id: &CourseId) -> bool {
        self.guard().can_delete_course(id)
    }

    pub fn filter_instances(&self, filter: &InstanceFilter) -> Vec<&CourseInstance> {
        query::filter_instances(&self.instances, filter)
    }

    /// Filtered instances grouped by period, most recent first
    pub fn schedule(&self, filter: &InstanceFilter) -> Vec<PeriodGroup<'_>> {
        query::group_by_period(self.filter_instances(filter))
    }

    pub(crate) fn replace(&mut self, courses: Vec<Course>, instances: Vec<CourseInstance>) {
        self.courses = courses;
        self.instances = instances;
    }

    /// Appends, or replaces a stale entry with the same id in place
    pub(crate) fn upsert_course(&mut self, course: Course) {
        match self
            .courses
            .iter_mut()
            .find(|c| c.course_id == course.course_id)
        {
            Some(existing) => *existing = course,
            None => self.courses.push(course),
        }
    }

    pub(crate) fn remove_course(&mut self, id: &CourseId) -> Option<Course> {
        let index = self.courses.iter().position(|c| &c.course_id == id)?;
        Some(self.courses.remove(index))
    }

    pub(crate) fn upsert_instance(&mut self, instance: CourseInstance) {
        let key = instance.key();
        match self.instances.iter_mut().find(|i| i.matches(&key)) {
            Some(existing) => *existing = instance,
            None => self.instances.push(instance),
        }
    }

    pub(crate) fn remove_instance(&mut self, key: &InstanceKey) -> Option<CourseInstance> {
        let index = self.instances.iter().position(|i| i.matches(key))?;
        Some(self.instances.remove(index))
    }
}
