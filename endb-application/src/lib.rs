//! Write flows that combine use cases with database transactions.
//!
//! Every mutation of the database runs on the single exclusive
//! connection and is rolled back when the use case fails.

#[macro_use]
extern crate log;

mod create_listing;
mod create_review;
mod delete_listing;
mod favorites;
mod register;
mod update_listing;
mod vote_review;

pub mod prelude {
    pub use super::{
        create_listing::*, create_review::*, delete_listing::*, favorites::*, register::*,
        update_listing::*, vote_review::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use endb_core::{entities::*, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use endb_db_sqlite::Connections;
}
