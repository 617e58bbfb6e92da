use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The write would break a uniqueness or referential rule
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
