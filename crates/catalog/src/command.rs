use models::{Course, Semester, Year};

/// Raw input for creating a course, validated wholesale by the guard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCourseCommand {
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub prerequisites: Vec<String>,
}

impl CreateCourseCommand {
    pub fn new(
        course_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            title: title.into(),
            description: description.into(),
            prerequisites: vec![],
        }
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }
}

/// Lets a store re-run the guard on a course it received
impl From<&Course> for CreateCourseCommand {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.course_id.to_string(),
            title: course.title.clone(),
            description: course.description.clone(),
            prerequisites: course
                .prerequisites
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Raw input for scheduling an instance. `None` means "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateInstanceCommand {
    pub course_id: String,
    pub year: Option<Year>,
    pub semester: Option<Semester>,
}

impl CreateInstanceCommand {
    pub fn new(course_id: impl Into<String>, year: Year, semester: Semester) -> Self {
        Self {
            course_id: course_id.into(),
            year: Some(year),
            semester: Some(semester),
        }
    }
}
