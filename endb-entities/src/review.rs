use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{EnumCount, EnumIter, EnumString};
use thiserror::Error;

use crate::{email::*, id::*, rating::*, time::*};

pub type ReviewStatusPrimitive = i16;

/// Moderation state of a review.
///
/// Only approved reviews are publicly visible and contribute
/// to a listing's average rating.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive, EnumIter, EnumCount, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ReviewStatus {
    Rejected = -1,
    Pending  =  0,
    Approved =  1,
}

impl ReviewStatus {
    pub fn is_visible(self) -> bool {
        self == Self::Approved
    }

    pub const fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Error)]
#[error("Invalid review status primitive: {0}")]
pub struct InvalidReviewStatusPrimitive(ReviewStatusPrimitive);

impl TryFrom<ReviewStatusPrimitive> for ReviewStatus {
    type Error = InvalidReviewStatusPrimitive;
    fn try_from(from: ReviewStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidReviewStatusPrimitive(from))
    }
}

impl From<ReviewStatus> for ReviewStatusPrimitive {
    fn from(from: ReviewStatus) -> Self {
        from.to_i16().expect("Review status primitive")
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id              : Id,
    pub listing_id      : Id,
    pub reviewer        : EmailAddress,
    pub created_at      : TimestampMs,
    pub rating          : RatingValue,
    pub comment         : String,
    pub status          : ReviewStatus,
    pub helpful_count   : u32,
    pub unhelpful_count : u32,
}

/// A helpfulness vote on a review, one per voter and review.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewVote {
    pub review_id  : Id,
    pub voter      : EmailAddress,
    pub helpful    : bool,
    pub created_at : TimestampMs,
}
