// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use endb_core::{
    db::{ListingQuery, ReviewStats, SortOption},
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod favorite;
mod listing;
mod review;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn load_listing_status(status: i16) -> Result<ListingStatus> {
    ListingStatus::try_from(status)
        .map_err(|_| anyhow!("Invalid listing status: {status}").into())
}

fn load_review_status(status: i16) -> Result<ReviewStatus> {
    ReviewStatus::try_from(status)
        .map_err(|_| anyhow!("Invalid review status: {status}").into())
}
