#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # endb-entities
//!
//! Reusable, agnostic domain entities for EcoNomadDB.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod category;
pub mod eco;
pub mod email;
pub mod favorite;
pub mod geo;
pub mod id;
pub mod listing;
pub mod password;
pub mod rating;
pub mod review;
pub mod time;
pub mod user;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
