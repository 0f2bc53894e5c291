mod add_favorite;
mod create_listing;
mod create_review;
mod delete_listing;
mod error;
mod featured_listings;
mod get_listing;
mod login;
mod query_favorites;
mod query_reviews;
mod register;
mod search_listings;
mod update_listing;
mod vote_review;

#[cfg(test)]
pub mod tests;

type Result<T> = std::result::Result<T, Error>;

pub use self::{
    add_favorite::*, create_listing::*, create_review::*, delete_listing::*, error::Error,
    featured_listings::*, get_listing::*, login::*, query_favorites::*, query_reviews::*,
    register::*, search_listings::*, update_listing::*, vote_review::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{db::*, entities::*, filter::*, repositories::*};
}
