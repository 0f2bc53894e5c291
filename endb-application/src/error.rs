use std::io;

use thiserror::Error;

use endb_core::{repositories::Error as RepoError, usecases::Error as BError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        Self::Business(BError::Repo(err))
    }
}
