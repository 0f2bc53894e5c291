use thiserror::Error;

use crate::repositories;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The title is invalid")]
    Title,
    #[error("The slug is invalid")]
    Slug,
    #[error("Invalid category")]
    Category,
    #[error("Invalid email address")]
    EmailAddress,
    #[error("Invalid password")]
    Password,
    #[error("Invalid credentials")]
    Credentials,
    #[error("Rating value out of range")]
    RatingValue,
    #[error("The comment length is invalid")]
    Comment,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("This is not allowed")]
    Forbidden,
    #[error("The user already exists")]
    UserExists,
    #[error("The slug is already in use")]
    SlugExists,
    #[error("The listing has already been reviewed by this user")]
    ReviewExists,
    #[error("The listing has already been favorited")]
    FavoriteExists,
    #[error("Too many requests")]
    RateLimit,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<endb_entities::password::ParseError> for Error {
    fn from(_: endb_entities::password::ParseError) -> Self {
        Self::Password
    }
}

impl From<endb_entities::email::EmailAddressParseError> for Error {
    fn from(_: endb_entities::email::EmailAddressParseError) -> Self {
        Self::EmailAddress
    }
}

impl From<endb_entities::geo::InvalidGeoPoint> for Error {
    fn from(_: endb_entities::geo::InvalidGeoPoint) -> Self {
        Self::InvalidPosition
    }
}
