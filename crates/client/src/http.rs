//! [`CourseStore`] backed by the catalog REST API

use crate::config::ClientConfig;
use async_trait::async_trait;
use catalog::{CatalogError, CatalogResult, CourseStore, ErrorKind, InstanceFilter};
use log::debug;
use models::{Course, CourseId, CourseInstance, InstanceKey};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::str::FromStr;

/// Error body sent by the API: `{"message", "code", "kind"?}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    kind: Option<String>,
}

/// Maps a failed response onto the catalog error taxonomy.
///
/// A recognised `kind` wins; otherwise 404 becomes `NotFound` and everything
/// else is a transport error carrying the status code.
pub fn error_from_response(status: u16, body: &str) -> CatalogError {
    let (message, kind) = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => (
            parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP {status}")),
            parsed.kind.and_then(|k| ErrorKind::from_str(&k).ok()),
        ),
        Err(_) => ("Unknown error occurred".to_string(), None),
    };

    match kind {
        Some(kind) => CatalogError::from_kind(kind, message, status),
        None if status == StatusCode::NOT_FOUND.as_u16() => CatalogError::NotFound(message),
        None => CatalogError::transport(message, status),
    }
}

fn transport_error(e: reqwest::Error) -> CatalogError {
    let code = e.status().map(|s| s.as_u16()).unwrap_or(0);
    CatalogError::transport(e.to_string(), code)
}

pub struct HttpStore {
    http: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(config: &ClientConfig) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn instance_path(key: &InstanceKey) -> String {
        format!(
            "/instances/{}/{}/{}",
            key.year,
            key.semester.number(),
            key.course_id
        )
    }

    /// Sends a request and returns the successful response, mapping failures
    async fn execute(&self, request: RequestBuilder) -> CatalogResult<reqwest::Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status.as_u16(), &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> CatalogResult<T> {
        self.execute(request)
            .await?
            .json()
            .await
            .map_err(transport_error)
    }
}

#[async_trait]
impl CourseStore for HttpStore {
    async fn list_courses(&self) -> CatalogResult<Vec<Course>> {
        self.fetch(self.http.get(self.url("/courses"))).await
    }

    async fn get_course(&self, id: &CourseId) -> CatalogResult<Course> {
        self.fetch(self.http.get(self.url(&format!("/courses/{id}"))))
            .await
    }

    async fn create_course(&self, course: &Course) -> CatalogResult<Course> {
        self.fetch(self.http.post(self.url("/courses")).json(course))
            .await
    }

    async fn delete_course(&self, id: &CourseId) -> CatalogResult<()> {
        self.execute(self.http.delete(self.url(&format!("/courses/{id}"))))
            .await
            .map(|_| ())
    }

    async fn list_instances(&self, filter: &InstanceFilter) -> CatalogResult<Vec<CourseInstance>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(year) = filter.year {
            params.push(("year", year.to_string()));
        }
        if let Some(semester) = filter.semester {
            params.push(("semester", semester.number().to_string()));
        }

        self.fetch(self.http.get(self.url("/instances")).query(&params))
            .await
    }

    async fn get_instance(&self, key: &InstanceKey) -> CatalogResult<CourseInstance> {
        self.fetch(self.http.get(self.url(&Self::instance_path(key))))
            .await
    }

    async fn create_instance(&self, key: &InstanceKey) -> CatalogResult<CourseInstance> {
        self.fetch(self.http.post(self.url("/instances")).json(key))
            .await
    }

    async fn delete_instance(&self, key: &InstanceKey) -> CatalogResult<()> {
        self.execute(self.http.delete(self.url(&Self::instance_path(key))))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Semester, Year};
    use serde_json::json;

    #[test]
    fn test_kind_in_body_wins() {
        let err = error_from_response(
            409,
            r#"{"message":"Course CS101 already exists","code":409,"kind":"DuplicateError"}"#,
        );
        assert_eq!(err, CatalogError::Duplicate("Course CS101 already exists".to_string()));

        let err = error_from_response(
            409,
            r#"{"message":"CS101 is required by CS201","code":409,"kind":"DependencyConflictError"}"#,
        );
        assert_eq!(err.kind(), ErrorKind::DependencyConflict);
    }

    #[test]
    fn test_not_found_without_kind() {
        let err = error_from_response(404, r#"{"message":"no such instance"}"#);
        assert_eq!(err, CatalogError::NotFound("no such instance".to_string()));
    }

    #[test]
    fn test_unstructured_failures_are_transport() {
        assert_eq!(
            error_from_response(500, "<html>oops</html>"),
            CatalogError::transport("Unknown error occurred", 500)
        );
        assert_eq!(
            error_from_response(503, r#"{"code":503}"#),
            CatalogError::transport("HTTP 503", 503)
        );
        assert_eq!(
            error_from_response(400, r#"{"message":"bad","kind":"SomethingElse"}"#),
            CatalogError::transport("bad", 400)
        );
    }

    #[test]
    fn test_urls() {
        let config = ClientConfig::default().with_base_url("http://api.test/api/");
        let store = HttpStore::new(&config).unwrap();
        assert_eq!(store.url("/courses"), "http://api.test/api/courses");

        let key = InstanceKey::new(
            "CS101".parse().unwrap(),
            Year::new(2025).unwrap(),
            Semester::Fall,
        );
        assert_eq!(HttpStore::instance_path(&key), "/instances/2025/2/CS101");
        assert_eq!(store.base_url(), "http://api.test/api");
    }

    #[test]
    fn test_request_bodies() {
        let key = InstanceKey::new(
            "CS101".parse().unwrap(),
            Year::new(2025).unwrap(),
            Semester::Spring,
        );
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!({"courseId": "CS101", "year": 2025, "semester": 1})
        );

        let course = Course {
            course_id: "CS201".parse().unwrap(),
            title: "Data Structures".to_string(),
            description: "Trees".to_string(),
            prerequisites: vec!["CS101".parse().unwrap()],
        };
        assert_eq!(
            serde_json::to_value(&course).unwrap(),
            json!({
                "courseId": "CS201",
                "title": "Data Structures",
                "description": "Trees",
                "prerequisites": ["CS101"]
            })
        );
    }

    #[test]
    fn test_instance_responses() {
        let bare: CourseInstance =
            serde_json::from_value(json!({"courseId": "CS101", "year": 2025, "semester": 2}))
                .unwrap();
        assert_eq!(bare.semester, Semester::Fall);
        assert!(bare.course.is_none());

        let embedded: CourseInstance = serde_json::from_value(json!({
            "courseId": "CS101",
            "year": 2025,
            "semester": 1,
            "course": {"courseId": "CS101", "title": "Intro", "description": "Basics"}
        }))
        .unwrap();
        assert_eq!(embedded.title(), "Intro");
        assert!(embedded.course.unwrap().prerequisites.is_empty());

        assert!(
            serde_json::from_value::<CourseInstance>(
                json!({"courseId": "CS101", "year": 2025, "semester": "Fall"})
            )
            .is_err()
        );
    }
}
