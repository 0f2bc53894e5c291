use super::prelude::*;

pub fn add_favorite<R>(repo: &R, user: &EmailAddress, listing: &str) -> Result<Favorite>
where
    R: ListingRepo + FavoriteRepo,
{
    // Resolves id or slug and rejects deleted listings.
    let listing = super::get_listing(repo, listing)?;
    if repo.try_get_favorite(user, listing.id.as_str())?.is_some() {
        return Err(Error::FavoriteExists);
    }
    let favorite = Favorite {
        user: user.clone(),
        listing_id: listing.id,
        created_at: TimestampMs::now(),
    };
    repo.create_favorite(&favorite)?;
    Ok(favorite)
}

pub fn remove_favorite<R: FavoriteRepo>(
    repo: &R,
    user: &EmailAddress,
    listing_id: &str,
) -> Result<()> {
    Ok(repo.delete_favorite(user, listing_id)?)
}
