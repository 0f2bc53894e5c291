use super::prelude::*;

/// Look up a listing by its id, falling back to the slug.
///
/// Deleted listings are not found.
pub fn get_listing<R: ListingRepo>(repo: &R, id_or_slug: &str) -> Result<Listing> {
    let listing = match repo.get_listing(id_or_slug) {
        Ok(listing) => listing,
        Err(crate::repositories::Error::NotFound) => repo
            .try_get_listing_by_slug(id_or_slug)?
            .ok_or(crate::repositories::Error::NotFound)?,
        Err(err) => return Err(err.into()),
    };
    if !listing.status.exists() {
        return Err(Error::Repo(crate::repositories::Error::NotFound));
    }
    Ok(listing)
}
