use super::prelude::*;

/// The user's favorites with their listings, newest first.
///
/// Favorites of listings that have been deleted in the meantime
/// are skipped instead of failing the whole request.
pub fn query_favorites<R>(repo: &R, user: &EmailAddress) -> Result<Vec<(Favorite, Listing)>>
where
    R: ListingRepo + FavoriteRepo,
{
    let favorites = repo.favorites_of_user(user)?;
    let mut results = Vec::with_capacity(favorites.len());
    for favorite in favorites {
        match repo.get_listing(favorite.listing_id.as_str()) {
            Ok(listing) if listing.status.exists() => results.push((favorite, listing)),
            Ok(_) | Err(crate::repositories::Error::NotFound) => (),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::{super::add_favorite, super::tests::MockDb, *};
    use endb_entities::builders::*;

    #[test]
    fn skip_favorites_of_deleted_listings() {
        let db = MockDb::default();
        db.add_listing(Listing::build().id("kept").slug("kept").finish());
        db.add_listing(Listing::build().id("gone").slug("gone").finish());
        let user = EmailAddress::new_unchecked("nomad@example.com".into());
        add_favorite(&db, &user, "kept").unwrap();
        add_favorite(&db, &user, "gone").unwrap();

        let mut gone = db.get_listing("gone").unwrap();
        gone.status = ListingStatus::Deleted;
        db.update_listing(&gone).unwrap();

        let favorites = query_favorites(&db, &user).unwrap();
        assert_eq!(1, favorites.len());
        assert_eq!(Id::from("kept"), favorites[0].1.id);
    }
}
