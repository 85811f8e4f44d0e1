use crate::dtos::error::ErrorResponse;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::CatalogError;
use database::ServiceError;
use log::error;

/// Error returned by every handler, rendered as an [`ErrorResponse`]
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        Self(ServiceError::Catalog(e))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::Format(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        CatalogError::Format(rejection.body_text()).into()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        CatalogError::NotFound(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            ServiceError::Catalog(e) => {
                let kind = e.kind();
                let status = StatusCode::from_u16(kind.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = ErrorResponse {
                    message: e.message().to_string(),
                    code: status.as_u16(),
                    kind: Some(kind.to_string()),
                };
                (status, body)
            }
            ServiceError::Db(e) => {
                error!("Database error: {e}");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ErrorResponse {
                    message: "Internal server error".to_string(),
                    code: status.as_u16(),
                    kind: None,
                };
                (status, body)
            }
        };

        (status, Json(body)).into_response()
    }
}
