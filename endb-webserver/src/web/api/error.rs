use super::json_error_response;
use anyhow::anyhow;
use endb_application::error::AppError;
pub use endb_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity),
            JsonError::Parse(_str, err) => {
                Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity)
            }
        }
    }
}

fn parameter_error_status(err: &ParameterError) -> Option<Status> {
    let status = match err {
        ParameterError::Credentials | ParameterError::Unauthorized => Status::Unauthorized,
        ParameterError::Forbidden => Status::Forbidden,
        ParameterError::RateLimit => Status::TooManyRequests,
        ParameterError::UserExists
        | ParameterError::SlugExists
        | ParameterError::ReviewExists
        | ParameterError::FavoriteExists => Status::Conflict,
        ParameterError::Repo(RepoError::NotFound) => Status::NotFound,
        ParameterError::Repo(RepoError::AlreadyExists) => Status::Conflict,
        ParameterError::Repo(_) => return None,
        _ => Status::BadRequest,
    };
    Some(status)
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(err) => {
                if let AppError::Business(err) = &err {
                    if let Some(status) = parameter_error_status(err) {
                        return json_error_response(req, err, status);
                    }
                }
                error!("Error: {err}");
                Err(Status::InternalServerError)
            }
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status),
            Error::Other(err) => {
                error!("Error: {err}");
                Err(Status::InternalServerError)
            }
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}

impl From<endb_core::entities::EmailAddressParseError> for Error {
    fn from(err: endb_core::entities::EmailAddressParseError) -> Self {
        Self::OtherWithStatus(err.into(), Status::BadRequest)
    }
}
