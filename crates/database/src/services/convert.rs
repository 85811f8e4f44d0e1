//! Conversions between table rows and catalog models

use crate::entities::{course, instance, prerequisite};
use models::{Course, CourseId, CourseInstance, InstanceKey, Semester, Year};
use sea_orm::DbErr;
use std::collections::HashMap;

fn course_id(raw: &str) -> Result<CourseId, DbErr> {
    raw.parse()
        .map_err(|e| DbErr::Custom(format!("Stored course has an invalid id: {e}")))
}

/// Builds courses from their rows, attaching each course's prerequisite edges
/// in list order. Edge rows must already be sorted by position.
pub fn to_courses(
    courses: Vec<course::Model>,
    prerequisites: Vec<prerequisite::Model>,
) -> Result<Vec<Course>, DbErr> {
    let mut edges_by_course: HashMap<String, Vec<prerequisite::Model>> = HashMap::new();
    for edge in prerequisites {
        edges_by_course
            .entry(edge.course_id.clone())
            .or_default()
            .push(edge);
    }

    courses
        .into_iter()
        .map(|row| {
            let prerequisites = edges_by_course
                .remove(&row.course_id)
                .unwrap_or_default()
                .iter()
                .map(|edge| course_id(&edge.prerequisite_id))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Course {
                course_id: course_id(&row.course_id)?,
                title: row.title,
                description: row.description,
                prerequisites,
            })
        })
        .collect()
}

pub fn to_key(row: &instance::Model) -> Result<InstanceKey, DbErr> {
    let year = u16::try_from(row.year)
        .ok()
        .and_then(Year::new)
        .ok_or_else(|| {
            DbErr::Custom(format!("Stored instance has an invalid year: {}", row.year))
        })?;
    let semester = u8::try_from(row.semester)
        .ok()
        .and_then(|s| Semester::try_from(s).ok())
        .ok_or_else(|| {
            DbErr::Custom(format!(
                "Stored instance has an invalid semester: {}",
                row.semester
            ))
        })?;

    Ok(InstanceKey::new(course_id(&row.course_id)?, year, semester))
}

/// Converts an instance row, embedding the course snapshot when it is known
pub fn to_instance(row: &instance::Model, courses: &[Course]) -> Result<CourseInstance, DbErr> {
    let mut instance = CourseInstance::new(to_key(row)?);
    instance.course = courses
        .iter()
        .find(|c| c.course_id == instance.course_id)
        .cloned();
    Ok(instance)
}
