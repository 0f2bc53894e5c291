use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{EnumCount, EnumIter, EnumString};
use thiserror::Error;

use crate::{category::*, eco::*, email::*, geo::*, id::*, time::*};

pub type ListingStatusPrimitive = i16;

/// Lifecycle state of a listing.
///
/// Deleting a listing only flips the status, the record itself
/// is kept (soft delete).
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive, EnumIter, EnumCount, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ListingStatus {
    Deleted = -1,
    Draft   =  0,
    Active  =  1,
}

impl ListingStatus {
    pub fn exists(self) -> bool {
        self != Self::Deleted
    }

    pub const fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Error)]
#[error("Invalid listing status primitive: {0}")]
pub struct InvalidListingStatusPrimitive(ListingStatusPrimitive);

impl TryFrom<ListingStatusPrimitive> for ListingStatus {
    type Error = InvalidListingStatusPrimitive;
    fn try_from(from: ListingStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidListingStatusPrimitive(from))
    }
}

impl From<ListingStatus> for ListingStatusPrimitive {
    fn from(from: ListingStatus) -> Self {
        from.to_i16().expect("Listing status primitive")
    }
}

/// A directory entry: coworking space, cafe, accommodation,
/// restaurant, or activity venue.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id             : Id,
    pub slug           : String,
    pub title          : String,
    pub description    : String,
    pub category       : Category,
    pub city           : String,
    pub address        : Option<String>,
    pub geo            : Option<GeoPoint>,
    pub price_usd      : Option<u32>,
    pub eco_tags       : Vec<String>,
    pub nomad_features : Vec<String>,
    pub eco_scores     : EcoScores,
    pub status         : ListingStatus,
    pub featured       : bool,
    pub owner          : EmailAddress,
    pub created_at     : TimestampMs,
    pub updated_at     : Option<TimestampMs>,
}

impl Listing {
    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }
}
