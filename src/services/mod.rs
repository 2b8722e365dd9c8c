use thiserror::Error;

use crate::repository::RepositoryError;

pub mod auth;
pub mod products;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome categories shared by every service call. Routes map each variant
/// onto an HTTP status.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request needs a session (or valid credentials) and has none.
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not found")]
    NotFound,
    /// Missing or invalid input; nothing was written.
    #[error("{0}")]
    Form(String),
    /// An identifier that can never exist in the store.
    #[error("{0}")]
    InvalidId(String),
    /// Store or infrastructure failure. Details are logged, not returned.
    #[error("Internal server error")]
    Internal,
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => {
                log::error!("Repository failure: {other}");
                ServiceError::Internal
            }
        }
    }
}
