use super::*;

pub fn create_listing(
    connections: &sqlite::Connections,
    owner: &User,
    new_listing: usecases::NewListing,
) -> Result<Listing> {
    let mut connection = connections.exclusive()?;
    let listing =
        connection.transaction(|conn| usecases::create_listing(conn, owner, new_listing))?;
    info!(
        "Created listing '{}' ({}) owned by {}",
        listing.title, listing.id, listing.owner
    );
    Ok(listing)
}
