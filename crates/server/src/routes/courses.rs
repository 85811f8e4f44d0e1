use crate::{
    dtos::{
        course::{CourseResponse, CreateCourseRequest},
        error::ErrorResponse,
    },
    error::ApiError,
    extract::{JsonBody, PathParams},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::course::CourseService;

/// List every course with its prerequisites
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses in creation order", body = Vec<CourseResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = CourseService::list_courses(&*state.db)
        .await
        .map_err(database::ServiceError::from)?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Get a course by its course ID
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    params(
        ("course_id" = String, Path, description = "Course ID, e.g. CS101")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    PathParams(course_id): PathParams<String>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course = CourseService::get_course(&state.db, &course_id).await?;
    Ok(Json(course.into()))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Malformed body or course ID, or a missing field", body = ErrorResponse),
        (status = 409, description = "Duplicate course or prerequisite cycle", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let course = CourseService::create_course(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

/// Delete a course that no other course requires and that has no scheduled instances
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    params(
        ("course_id" = String, Path, description = "Course ID, e.g. CS101")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Course is still required or scheduled", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    PathParams(course_id): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    CourseService::delete_course(&state.db, &course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
