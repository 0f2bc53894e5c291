use super::*;

pub fn update_listing(
    connections: &sqlite::Connections,
    user: &User,
    id: &str,
    update: usecases::UpdateListing,
) -> Result<Listing> {
    let mut connection = connections.exclusive()?;
    let listing =
        connection.transaction(|conn| usecases::update_listing(conn, user, id, update))?;
    Ok(listing)
}
