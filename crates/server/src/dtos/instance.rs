use crate::dtos::course::CourseResponse;
use catalog::{CatalogError, CreateInstanceCommand, InstanceFilter};
use models::{CourseInstance, Semester, Year};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

fn parse_year(year: u16) -> Result<Year, CatalogError> {
    Year::new(year).ok_or_else(|| CatalogError::Format(format!("Invalid year: {year}")))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstanceResponse {
    #[schema(example = "CS101")]
    pub course_id: String,
    #[schema(example = 2025)]
    pub year: u16,
    /// 1 = Spring, 2 = Fall
    #[schema(example = 1)]
    pub semester: u8,
    /// The scheduled course, absent when it no longer exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseResponse>,
}

impl From<CourseInstance> for InstanceResponse {
    fn from(instance: CourseInstance) -> Self {
        Self {
            course_id: instance.course_id.into(),
            year: instance.year.into(),
            semester: instance.semester.into(),
            course: instance.course.map(CourseResponse::from),
        }
    }
}

/// Year and semester may be left out; the store reports them as missing
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    #[serde(default)]
    #[schema(example = "CS101")]
    pub course_id: String,
    #[schema(example = 2025)]
    pub year: Option<u16>,
    #[schema(example = 1)]
    pub semester: Option<u8>,
}

impl TryFrom<CreateInstanceRequest> for CreateInstanceCommand {
    type Error = CatalogError;

    fn try_from(request: CreateInstanceRequest) -> Result<Self, Self::Error> {
        Ok(CreateInstanceCommand {
            course_id: request.course_id,
            year: request.year.map(parse_year).transpose()?,
            semester: request.semester.map(Semester::try_from).transpose()?,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InstanceQueryParams {
    /// Only instances in this year
    pub year: Option<u16>,
    /// Only instances in this semester (1 = Spring, 2 = Fall)
    pub semester: Option<u8>,
}

impl TryFrom<InstanceQueryParams> for InstanceFilter {
    type Error = CatalogError;

    fn try_from(params: InstanceQueryParams) -> Result<Self, Self::Error> {
        Ok(InstanceFilter::new(
            params.year.map(parse_year).transpose()?,
            params.semester.map(Semester::try_from).transpose()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::ErrorKind;
    use models::{Course, InstanceKey};

    #[test]
    fn test_create_request_conversion() {
        let command = CreateInstanceCommand::try_from(CreateInstanceRequest {
            course_id: "CS101".to_string(),
            year: Some(2025),
            semester: None,
        })
        .unwrap();
        assert_eq!(command.year, Year::new(2025));
        assert_eq!(command.semester, None);

        let err = CreateInstanceCommand::try_from(CreateInstanceRequest {
            course_id: "CS101".to_string(),
            year: Some(2025),
            semester: Some(3),
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_query_params_conversion() {
        let filter = InstanceFilter::try_from(InstanceQueryParams {
            year: None,
            semester: Some(2),
        })
        .unwrap();
        assert_eq!(filter, InstanceFilter::new(None, Some(Semester::Fall)));

        assert!(
            InstanceFilter::try_from(InstanceQueryParams {
                year: Some(0),
                semester: None,
            })
            .is_err()
        );
    }

    #[test]
    fn test_accepts_instance_key_sent_by_client() {
        let key = InstanceKey::new(
            "CS101".parse().unwrap(),
            Year::new(2025).unwrap(),
            Semester::Fall,
        );

        let request: CreateInstanceRequest =
            serde_json::from_value(serde_json::to_value(&key).unwrap()).unwrap();
        let command = CreateInstanceCommand::try_from(request).unwrap();
        assert_eq!(
            command,
            CreateInstanceCommand::new("CS101", key.year, key.semester)
        );
    }

    #[test]
    fn test_response_reads_back_as_instance() {
        let key = InstanceKey::new(
            "CS101".parse().unwrap(),
            Year::new(2025).unwrap(),
            Semester::Spring,
        );
        let mut instance = CourseInstance::new(key.clone());

        let bare = serde_json::to_value(InstanceResponse::from(instance.clone())).unwrap();
        assert!(bare.get("course").is_none());
        let decoded: CourseInstance = serde_json::from_value(bare).unwrap();
        assert_eq!(decoded, instance);

        instance.course = Some(Course {
            course_id: key.course_id.clone(),
            title: "Intro".to_string(),
            description: "Basics".to_string(),
            prerequisites: Vec::new(),
        });
        let full = serde_json::to_value(InstanceResponse::from(instance.clone())).unwrap();
        let decoded: CourseInstance = serde_json::from_value(full).unwrap();
        assert_eq!(decoded, instance);
        assert_eq!(decoded.title(), "Intro");
    }
}
