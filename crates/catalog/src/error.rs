use models::{CourseId, InstanceKey, InvalidCourseId, InvalidPeriod};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// The failure kinds a catalog operation can report, named as they travel on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum ErrorKind {
    #[strum(serialize = "FormatError")]
    Format,
    #[strum(serialize = "RequiredFieldError")]
    RequiredField,
    #[strum(serialize = "DuplicateError")]
    Duplicate,
    #[strum(serialize = "DependencyConflictError")]
    DependencyConflict,
    #[strum(serialize = "NotFoundError")]
    NotFound,
    #[strum(serialize = "TransportError")]
    Transport,
}

impl ErrorKind {
    /// HTTP status used when this kind is reported by the store
    pub fn status_code(self) -> u16 {
        match self {
            Self::Format | Self::RequiredField => 400,
            Self::NotFound => 404,
            Self::Duplicate | Self::DependencyConflict => 409,
            Self::Transport => 502,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Malformed identifier or value
    #[error("{0}")]
    Format(String),

    /// A mandatory field was empty or not selected
    #[error("{0}")]
    RequiredField(String),

    /// Course identifier or instance key already taken
    #[error("{0}")]
    Duplicate(String),

    /// Blocked by the prerequisite graph
    #[error("{message}")]
    DependencyConflict {
        message: String,
        /// Empty when the conflict was reported by the store
        dependents: Vec<CourseId>,
    },

    /// Referenced entity absent
    #[error("{0}")]
    NotFound(String),

    /// The store could not be reached or answered with an unmapped failure
    #[error("{message} (HTTP {code})")]
    Transport { message: String, code: u16 },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format(_) => ErrorKind::Format,
            Self::RequiredField(_) => ErrorKind::RequiredField,
            Self::Duplicate(_) => ErrorKind::Duplicate,
            Self::DependencyConflict { .. } => ErrorKind::DependencyConflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// The message without the transport code suffix
    pub fn message(&self) -> &str {
        match self {
            Self::Format(m)
            | Self::RequiredField(m)
            | Self::Duplicate(m)
            | Self::NotFound(m)
            | Self::DependencyConflict { message: m, .. }
            | Self::Transport { message: m, .. } => m.as_str(),
        }
    }

    /// Rebuilds an error reported by the store. `code` is only kept for transport failures.
    pub fn from_kind(kind: ErrorKind, message: impl Into<String>, code: u16) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Format => Self::Format(message),
            ErrorKind::RequiredField => Self::RequiredField(message),
            ErrorKind::Duplicate => Self::Duplicate(message),
            ErrorKind::DependencyConflict => Self::DependencyConflict {
                message,
                dependents: vec![],
            },
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::Transport => Self::Transport { message, code },
        }
    }

    pub fn transport(message: impl Into<String>, code: u16) -> Self {
        Self::Transport {
            message: message.into(),
            code,
        }
    }

    pub fn required(field: &str) -> Self {
        Self::RequiredField(format!("{field} is required"))
    }

    pub fn duplicate_course(id: &CourseId) -> Self {
        Self::Duplicate(format!("Course {id} already exists"))
    }

    pub fn duplicate_instance(key: &InstanceKey) -> Self {
        Self::Duplicate(format!("Course instance {key} already exists"))
    }

    pub fn course_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Course {id} not found"))
    }

    pub fn instance_not_found(key: &InstanceKey) -> Self {
        Self::NotFound(format!("Course instance {key} not found"))
    }

    pub fn prerequisite_of(id: &CourseId, dependents: Vec<CourseId>) -> Self {
        let names = dependents
            .iter()
            .map(CourseId::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Self::DependencyConflict {
            message: format!("Course {id} can't be deleted since it is a prerequisite of {names}"),
            dependents,
        }
    }
}

impl From<InvalidCourseId> for CatalogError {
    fn from(e: InvalidCourseId) -> Self {
        Self::Format(e.to_string())
    }
}

impl From<InvalidPeriod> for CatalogError {
    fn from(e: InvalidPeriod) -> Self {
        Self::Format(e.to_string())
    }
}
