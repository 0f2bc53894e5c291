pub mod db;
pub mod eco;
pub mod filter;
pub mod rating;
pub mod repositories;
pub mod usecases;

pub mod entities {
    pub use endb_entities::{
        category::*, eco::*, email::*, favorite::*, geo::*, id::*, listing::*, password::*,
        rating::*, review::*, time::*, user::*,
    };
}
