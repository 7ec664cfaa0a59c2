use chowkashi_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use thiserror::Error;

pub use chowkashi_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl AppError {
    pub fn is_invalid_postal_code(&self) -> bool {
        matches!(
            self,
            Self::Business(BError::Parameter(ParameterError::InvalidPostalCode))
        )
    }
}
