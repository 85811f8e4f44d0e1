use crate::period::{Period, Semester, Year};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use thiserror::Error;

lazy_static! {
    static ref COURSE_ID: Regex = Regex::new(r"^[A-Z]{2,4}[0-9]{3}$").unwrap();
}

/// Shown for instances whose course snapshot was not supplied
pub const UNKNOWN_COURSE_TITLE: &str = "Unknown course";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Course ID should be in format like CS101, MATH201 (got '{0}')")]
pub struct InvalidCourseId(pub String);

/// A course identifier: 2-4 uppercase letters followed by 3 digits
///
/// Parsing is case-insensitive; the stored form is always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading letters, e.g. "MATH" for MATH201
    pub fn department(&self) -> &str {
        self.0.trim_end_matches(|c: char| c.is_ascii_digit())
    }
}

impl FromStr for CourseId {
    type Err = InvalidCourseId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();
        if COURSE_ID.is_match(&normalized) {
            Ok(CourseId(normalized))
        } else {
            Err(InvalidCourseId(s.to_string()))
        }
    }
}

impl TryFrom<String> for CourseId {
    type Error = InvalidCourseId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CourseId> for String {
    fn from(id: CourseId) -> Self {
        id.0
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CourseId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CourseId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for CourseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    /// Kept in insertion order
    #[serde(default)]
    pub prerequisites: Vec<CourseId>,
}

impl Course {
    /// Whether this course lists `id` as a prerequisite
    pub fn requires(&self, id: &CourseId) -> bool {
        self.prerequisites.contains(id)
    }
}

/// Identifies a scheduled instance: (course, year, semester)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceKey {
    pub course_id: CourseId,
    pub year: Year,
    pub semester: Semester,
}

impl InstanceKey {
    pub fn new(course_id: CourseId, year: Year, semester: Semester) -> Self {
        Self {
            course_id,
            year,
            semester,
        }
    }

    pub fn period(&self) -> Period {
        Period::new(self.year, self.semester)
    }
}

impl Display for InstanceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.course_id, self.period().label())
    }
}

/// A scheduled occurrence of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInstance {
    pub course_id: CourseId,
    pub year: Year,
    pub semester: Semester,
    /// Snapshot of the referenced course, when the store embeds it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<Course>,
}

impl CourseInstance {
    pub fn new(key: InstanceKey) -> Self {
        Self {
            course_id: key.course_id,
            year: key.year,
            semester: key.semester,
            course: None,
        }
    }

    pub fn key(&self) -> InstanceKey {
        InstanceKey::new(self.course_id.clone(), self.year, self.semester)
    }

    pub fn period(&self) -> Period {
        Period::new(self.year, self.semester)
    }

    pub fn matches(&self, key: &InstanceKey) -> bool {
        self.course_id == key.course_id && self.year == key.year && self.semester == key.semester
    }

    pub fn title(&self) -> &str {
        self.course
            .as_ref()
            .map(|c| c.title.as_str())
            .unwrap_or(UNKNOWN_COURSE_TITLE)
    }
}
