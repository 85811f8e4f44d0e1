use crate::{
    dtos::{
        error::ErrorResponse,
        instance::{CreateInstanceRequest, InstanceQueryParams, InstanceResponse},
    },
    error::ApiError,
    extract::{JsonBody, PathParams, QueryParams},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use catalog::{CatalogError, CreateInstanceCommand, InstanceFilter};
use database::services::instance::InstanceService;
use models::{InstanceKey, Semester, Year};

/// An unparseable path names an instance that cannot exist
fn instance_key(year: u16, semester: u8, course_id: &str) -> Result<InstanceKey, CatalogError> {
    let not_found = || {
        CatalogError::NotFound(format!(
            "Course instance {} ({year}-{semester}) not found",
            course_id.to_uppercase()
        ))
    };

    Ok(InstanceKey::new(
        course_id.parse().map_err(|_| not_found())?,
        Year::new(year).ok_or_else(not_found)?,
        Semester::try_from(semester).map_err(|_| not_found())?,
    ))
}

/// List scheduled instances, optionally filtered by year and semester
#[utoipa::path(
    get,
    path = "/api/instances",
    params(InstanceQueryParams),
    responses(
        (status = 200, description = "Instances ordered by year, semester and course", body = Vec<InstanceResponse>),
        (status = 400, description = "Invalid year or semester", body = ErrorResponse)
    ),
    tag = "Instances"
)]
pub async fn list_instances(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<InstanceQueryParams>,
) -> Result<Json<Vec<InstanceResponse>>, ApiError> {
    let filter = InstanceFilter::try_from(params)?;
    let instances = InstanceService::list_instances(&state.db, &filter).await?;

    Ok(Json(
        instances.into_iter().map(InstanceResponse::from).collect(),
    ))
}

/// Get one scheduled instance
#[utoipa::path(
    get,
    path = "/api/instances/{year}/{semester}/{course_id}",
    params(
        ("year" = u16, Path, description = "Year, e.g. 2025"),
        ("semester" = u8, Path, description = "1 = Spring, 2 = Fall"),
        ("course_id" = String, Path, description = "Course ID, e.g. CS101")
    ),
    responses(
        (status = 200, description = "Instance found", body = InstanceResponse),
        (status = 404, description = "Instance not found", body = ErrorResponse)
    ),
    tag = "Instances"
)]
pub async fn get_instance(
    State(state): State<AppState>,
    PathParams((year, semester, course_id)): PathParams<(u16, u8, String)>,
) -> Result<Json<InstanceResponse>, ApiError> {
    let key = instance_key(year, semester, &course_id)?;
    let instance = InstanceService::get_instance(&state.db, &key).await?;
    Ok(Json(instance.into()))
}

/// Schedule a course for a year and semester
#[utoipa::path(
    post,
    path = "/api/instances",
    request_body = CreateInstanceRequest,
    responses(
        (status = 201, description = "Instance created", body = InstanceResponse),
        (status = 400, description = "Malformed body, or missing course, year or semester", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Instance already exists", body = ErrorResponse)
    ),
    tag = "Instances"
)]
pub async fn create_instance(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateInstanceRequest>,
) -> Result<(StatusCode, Json<InstanceResponse>), ApiError> {
    let command = CreateInstanceCommand::try_from(request)?;
    let instance = InstanceService::create_instance(&state.db, command).await?;
    Ok((StatusCode::CREATED, Json(instance.into())))
}

/// Remove a scheduled instance
#[utoipa::path(
    delete,
    path = "/api/instances/{year}/{semester}/{course_id}",
    params(
        ("year" = u16, Path, description = "Year, e.g. 2025"),
        ("semester" = u8, Path, description = "1 = Spring, 2 = Fall"),
        ("course_id" = String, Path, description = "Course ID, e.g. CS101")
    ),
    responses(
        (status = 204, description = "Instance removed"),
        (status = 404, description = "Instance not found", body = ErrorResponse)
    ),
    tag = "Instances"
)]
pub async fn delete_instance(
    State(state): State<AppState>,
    PathParams((year, semester, course_id)): PathParams<(u16, u8, String)>,
) -> Result<StatusCode, ApiError> {
    let key = instance_key(year, semester, &course_id)?;
    InstanceService::delete_instance(&state.db, &key).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::ErrorKind;

    #[test]
    fn test_instance_key_from_path() {
        let key = instance_key(2025, 2, "cs101").unwrap();
        assert_eq!(key.to_string(), "CS101 (Fall 2025)");

        for (year, semester, id) in [(2025, 3, "CS101"), (0, 1, "CS101"), (2025, 1, "101")] {
            assert_eq!(
                instance_key(year, semester, id).unwrap_err().kind(),
                ErrorKind::NotFound
            );
        }
    }
}
