use super::prelude::*;

pub const FEATURED_LIMIT: u64 = 10;

/// Up to [`FEATURED_LIMIT`] featured active listings, newest first.
pub fn featured_listings<R: ListingRepo>(repo: &R) -> Result<Vec<Listing>> {
    Ok(repo.featured_listings(FEATURED_LIMIT)?)
}
