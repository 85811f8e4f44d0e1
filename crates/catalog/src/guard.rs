//! Validation consulted before every catalog mutation.
//!
//! The guard only inspects state and returns a decision; callers perform the
//! mutation themselves once the guard accepts it.

use crate::{
    command::{CreateCourseCommand, CreateInstanceCommand},
    error::{CatalogError, CatalogResult},
    query,
};
use models::{Course, CourseId, CourseInstance, InstanceKey};
use std::collections::{HashMap, HashSet};

pub struct CatalogGuard<'a> {
    courses: &'a [Course],
    instances: &'a [CourseInstance],
}

impl<'a> CatalogGuard<'a> {
    pub fn new(courses: &'a [Course], instances: &'a [CourseInstance]) -> Self {
        Self { courses, instances }
    }

    fn course_exists(&self, id: &CourseId) -> bool {
        self.courses.iter().any(|c| &c.course_id == id)
    }

    /// Checks the identifier format and that it is not already taken
    pub fn validate_course_id(&self, raw: &str) -> CatalogResult<CourseId> {
        if raw.trim().is_empty() {
            return Err(CatalogError::required("Course ID"));
        }

        let id: CourseId = raw.parse()?;
        if self.course_exists(&id) {
            return Err(CatalogError::duplicate_course(&id));
        }

        Ok(id)
    }

    pub fn validate_course_fields(title: &str, description: &str) -> CatalogResult<()> {
        if title.trim().is_empty() {
            return Err(CatalogError::required("Course title"));
        }
        if description.trim().is_empty() {
            return Err(CatalogError::required("Course description"));
        }

        Ok(())
    }

    /// Parses and de-duplicates the prerequisite list of a new course `id`.
    ///
    /// Unknown identifiers are accepted as long as they are well formed. A
    /// course cannot require itself, and cannot require a course that already
    /// (transitively) requires it.
    pub fn validate_prerequisites(
        &self,
        id: &CourseId,
        raw: &[String],
    ) -> CatalogResult<Vec<CourseId>> {
        let mut prerequisites: Vec<CourseId> = Vec::with_capacity(raw.len());
        for entry in raw {
            let prerequisite: CourseId = entry.parse()?;
            if !prerequisites.contains(&prerequisite) {
                prerequisites.push(prerequisite);
            }
        }

        if prerequisites.contains(id) {
            return Err(CatalogError::DependencyConflict {
                message: format!("Course {id} cannot be its own prerequisite"),
                dependents: vec![id.clone()],
            });
        }

        if let Some(via) = self.find_cycle(id, &prerequisites) {
            return Err(CatalogError::DependencyConflict {
                message: format!("Course {via} already requires {id}; adding it as a prerequisite would create a cycle"),
                dependents: vec![via],
            });
        }

        Ok(prerequisites)
    }

    /// Returns the first prerequisite from which `id` is reachable through
    /// existing prerequisite edges
    fn find_cycle(&self, id: &CourseId, prerequisites: &[CourseId]) -> Option<CourseId> {
        let by_id: HashMap<&CourseId, &Course> =
            self.courses.iter().map(|c| (&c.course_id, c)).collect();

        prerequisites
            .iter()
            .find(|start| {
                let mut seen: HashSet<&CourseId> = HashSet::new();
                let mut stack = vec![*start];
                while let Some(current) = stack.pop() {
                    if current == id {
                        return true;
                    }
                    if !seen.insert(current) {
                        continue;
                    }
                    if let Some(course) = by_id.get(current) {
                        stack.extend(course.prerequisites.iter());
                    }
                }
                false
            })
            .cloned()
    }

    /// Validates a whole create-course command and returns the course to persist
    pub fn validate_create_course(&self, command: &CreateCourseCommand) -> CatalogResult<Course> {
        let course_id = self.validate_course_id(&command.course_id)?;
        Self::validate_course_fields(&command.title, &command.description)?;
        let prerequisites = self.validate_prerequisites(&course_id, &command.prerequisites)?;

        Ok(Course {
            course_id,
            title: command.title.trim().to_string(),
            description: command.description.trim().to_string(),
            prerequisites,
        })
    }

    /// A course may be deleted only while no other course requires it.
    /// Scheduled instances do not block deletion.
    pub fn can_delete_course(&self, id: &CourseId) -> bool {
        !self.courses.iter().any(|c| c.requires(id))
    }

    pub fn check_delete_course(&self, id: &CourseId) -> CatalogResult<()> {
        let dependents: Vec<CourseId> = query::dependents_of(self.courses, id)
            .into_iter()
            .map(|c| c.course_id.clone())
            .collect();

        if dependents.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::prerequisite_of(id, dependents))
        }
    }

    /// Checks a new instance names a live course and a free (course, year, semester) slot
    pub fn validate_instance_key(
        &self,
        command: &CreateInstanceCommand,
    ) -> CatalogResult<InstanceKey> {
        let raw = command.course_id.trim();
        if raw.is_empty() {
            return Err(CatalogError::RequiredField("Please select a course".to_string()));
        }
        let year = command
            .year
            .ok_or_else(|| CatalogError::RequiredField("Please select a year".to_string()))?;
        let semester = command
            .semester
            .ok_or_else(|| CatalogError::RequiredField("Please select a semester".to_string()))?;

        let course_id = raw
            .parse::<CourseId>()
            .ok()
            .filter(|id| self.course_exists(id))
            .ok_or_else(|| CatalogError::course_not_found(raw))?;

        let key = InstanceKey::new(course_id, year, semester);
        if self.instances.iter().any(|i| i.matches(&key)) {
            return Err(CatalogError::duplicate_instance(&key));
        }

        Ok(key)
    }
}
