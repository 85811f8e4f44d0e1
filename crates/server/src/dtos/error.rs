use serde::Serialize;
use utoipa::ToSchema;

/// Body of every failed request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Course CS101 can't be deleted since it is a prerequisite of CS201")]
    pub message: String,
    #[schema(example = 409)]
    pub code: u16,
    /// Error category, e.g. `DuplicateError`; absent for internal errors
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "DependencyConflictError")]
    pub kind: Option<String>,
}
