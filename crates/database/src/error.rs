use catalog::CatalogError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request broke a catalog rule
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl ServiceError {
    /// Turns a unique-key violation raced past the guard into `conflict`
    pub(crate) fn on_unique_violation(e: DbErr, conflict: impl FnOnce() -> CatalogError) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Catalog(conflict()),
            _ => Self::Db(e),
        }
    }
}
