use catalog::CreateCourseCommand;
use models::Course;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    #[schema(example = "CS201")]
    pub course_id: String,
    #[schema(example = "Data Structures")]
    pub title: String,
    pub description: String,
    /// Course IDs this course requires, in the order they were given
    #[schema(example = json!(["CS101"]))]
    pub prerequisites: Vec<String>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            course_id: course.course_id.into(),
            title: course.title,
            description: course.description,
            prerequisites: course
                .prerequisites
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    /// Two to four letters followed by three digits; lowercase is accepted
    #[serde(default)]
    #[schema(example = "cs201")]
    pub course_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl From<CreateCourseRequest> for CreateCourseCommand {
    fn from(request: CreateCourseRequest) -> Self {
        CreateCourseCommand::new(request.course_id, request.title, request.description)
            .with_prerequisites(request.prerequisites)
    }
}
