pub mod courses;
pub mod health;
pub mod instances;

use crate::{doc::ApiDoc, state::AppState};
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Every route of the service, with the OpenAPI document and Swagger UI mounted
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/{course_id}",
            get(courses::get_course).delete(courses::delete_course),
        )
        .route(
            "/instances",
            get(instances::list_instances).post(instances::create_instance),
        )
        .route(
            "/instances/{year}/{semester}/{course_id}",
            get(instances::get_instance).delete(instances::delete_instance),
        );

    Router::new()
        .nest("/api", api)
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use database::entities::{course, instance, prerequisite};
    use sea_orm::{DatabaseBackend, MockDatabase, prelude::DateTime};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn course_row(id: &str) -> course::Model {
        course::Model {
            course_id: id.to_string(),
            title: format!("{id} title"),
            description: "About it".to_string(),
            created_at: DateTime::default(),
        }
    }

    fn edge(course_id: &str, prerequisite_id: &str) -> prerequisite::Model {
        prerequisite::Model {
            course_id: course_id.to_string(),
            prerequisite_id: prerequisite_id.to_string(),
            position: 0,
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_courses() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![course_row("CS101"), course_row("CS201")]])
            .append_query_results([vec![edge("CS201", "CS101")]])
            .into_connection();

        let (status, body) = send(router(AppState::new(db)), get_request("/api/courses")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[1]["courseId"], "CS201");
        assert_eq!(body[1]["prerequisites"], json!(["CS101"]));
        assert_eq!(body[0]["prerequisites"], json!([]));
    }

    #[tokio::test]
    async fn test_create_course_with_bad_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<course::Model>::new()])
            .append_query_results([Vec::<prerequisite::Model>::new()])
            .into_connection();

        let (status, body) = send(
            router(AppState::new(db)),
            json_request(
                "POST",
                "/api/courses",
                json!({"courseId": "C1", "title": "Intro", "description": "Basics"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "FormatError");
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_get_unknown_instance() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<instance::Model>::new()])
            .into_connection();

        let (status, body) = send(
            router(AppState::new(db)),
            get_request("/api/instances/2025/1/CS101"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "NotFoundError");
    }

    #[tokio::test]
    async fn test_list_instances_rejects_bad_semester() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let (status, body) = send(
            router(AppState::new(db)),
            get_request("/api/instances?semester=5"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "FormatError");
    }

    fn empty_catalog() -> Router {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<course::Model>::new()])
            .append_query_results([Vec::<prerequisite::Model>::new()])
            .into_connection();
        router(AppState::new(db))
    }

    #[tokio::test]
    async fn test_missing_body_fields_are_required_errors() {
        let (status, body) = send(
            empty_catalog(),
            json_request("POST", "/api/instances", json!({"year": 2025, "semester": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "RequiredFieldError");
        assert_eq!(body["message"], "Please select a course");

        let (status, body) = send(
            empty_catalog(),
            json_request(
                "POST",
                "/api/courses",
                json!({"courseId": "CS101", "description": "Basics"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "RequiredFieldError");
        assert_eq!(body["message"], "Course title is required");
    }

    #[tokio::test]
    async fn test_undecodable_body_is_format_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let request = Request::builder()
            .method("POST")
            .uri("/api/courses")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(router(AppState::new(db)), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "FormatError");
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_undecodable_query_is_format_error() {
        for uri in ["/api/instances?year=abc", "/api/instances?year=70000"] {
            let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
            let (status, body) = send(router(AppState::new(db)), get_request(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["kind"], "FormatError", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_undecodable_path_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let (status, body) = send(
            router(AppState::new(db)),
            get_request("/api/instances/70000/1/CS101"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "NotFoundError");
        assert_eq!(body["code"], 404);
    }
}
