use super::prelude::*;

/// Soft delete: the status is flipped, the record remains.
pub fn delete_listing<R: ListingRepo>(repo: &R, user: &User, id: &str) -> Result<()> {
    let mut listing = repo.get_listing(id)?;
    if !listing.status.exists() {
        return Err(Error::Repo(crate::repositories::Error::NotFound));
    }
    if listing.owner != user.email && user.role < Role::Admin {
        return Err(Error::Forbidden);
    }
    listing.status = ListingStatus::Deleted;
    listing.updated_at = Some(TimestampMs::now());
    repo.update_listing(&listing)?;
    Ok(())
}
