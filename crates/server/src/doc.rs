use crate::{
    dtos::{
        course::{CourseResponse, CreateCourseRequest},
        error::ErrorResponse,
        instance::{CreateInstanceRequest, InstanceResponse},
    },
    routes::{courses, health, instances},
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        courses::list_courses,
        courses::get_course,
        courses::create_course,
        courses::delete_course,
        instances::list_instances,
        instances::get_instance,
        instances::create_instance,
        instances::delete_instance
    ),
    components(schemas(
        CourseResponse,
        CreateCourseRequest,
        InstanceResponse,
        CreateInstanceRequest,
        ErrorResponse
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Courses", description = "Courses and their prerequisites"),
        (name = "Instances", description = "Courses scheduled for a year and semester"),
    ),
    info(
        title = "Course Catalog API",
        version = "1.0.0",
        description = "Courses, prerequisites and scheduled course instances",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
