use crate::{email::*, id::*, time::*};

/// Bookmark of a listing by a user, at most one per pair.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub user       : EmailAddress,
    pub listing_id : Id,
    pub created_at : TimestampMs,
}
