// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use std::io;

use thiserror::Error;

use crate::{
    db::{ListingQuery, ReviewStats},
    entities::*,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

pub trait ListingRepo {
    fn create_listing(&self, listing: &Listing) -> Result<()>;
    fn update_listing(&self, listing: &Listing) -> Result<()>;

    fn get_listing(&self, id: &str) -> Result<Listing>;
    fn get_listings(&self, ids: &[&str]) -> Result<Vec<Listing>>;
    fn try_get_listing_by_slug(&self, slug: &str) -> Result<Option<Listing>>;

    /// Page of listings matching the query, in query sort order.
    fn query_listings(&self, query: &ListingQuery, pagination: &Pagination)
        -> Result<Vec<Listing>>;
    /// Total number of listings matching the query, independent of pagination.
    fn count_listings(&self, query: &ListingQuery) -> Result<u64>;

    fn featured_listings(&self, limit: u64) -> Result<Vec<Listing>>;
}

pub trait ReviewRepo {
    fn create_review(&self, review: &Review) -> Result<()>;
    fn update_review(&self, review: &Review) -> Result<()>;

    fn get_review(&self, id: &str) -> Result<Review>;
    fn approved_reviews_of_listing(&self, listing_id: &str) -> Result<Vec<Review>>;
    fn try_get_review_of_reviewer(
        &self,
        listing_id: &str,
        reviewer: &EmailAddress,
    ) -> Result<Option<Review>>;
    fn count_reviews_of_reviewer_since(
        &self,
        reviewer: &EmailAddress,
        since: TimestampMs,
    ) -> Result<u64>;

    /// Aggregate of all approved reviews, grouped by listing.
    ///
    /// Listings without any approved review are not contained
    /// in the result.
    fn approved_review_stats(&self) -> Result<Vec<ReviewStats>>;

    fn try_get_vote(&self, review_id: &str, voter: &EmailAddress) -> Result<Option<ReviewVote>>;
    fn create_vote(&self, vote: &ReviewVote) -> Result<()>;
    fn update_vote(&self, vote: &ReviewVote) -> Result<()>;
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User>;
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>>;
    fn count_users(&self) -> Result<usize>;
}

pub trait FavoriteRepo {
    fn create_favorite(&self, favorite: &Favorite) -> Result<()>;
    fn delete_favorite(&self, user: &EmailAddress, listing_id: &str) -> Result<()>;

    fn try_get_favorite(&self, user: &EmailAddress, listing_id: &str)
        -> Result<Option<Favorite>>;
    /// All favorites of a user, newest first.
    fn favorites_of_user(&self, user: &EmailAddress) -> Result<Vec<Favorite>>;
}
