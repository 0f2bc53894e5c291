use super::*;

pub fn add_favorite(
    connections: &sqlite::Connections,
    user: &EmailAddress,
    listing: &str,
) -> Result<Favorite> {
    let mut connection = connections.exclusive()?;
    let favorite = connection.transaction(|conn| usecases::add_favorite(conn, user, listing))?;
    Ok(favorite)
}

pub fn remove_favorite(
    connections: &sqlite::Connections,
    user: &EmailAddress,
    listing: &str,
) -> Result<()> {
    let mut connection = connections.exclusive()?;
    connection.transaction(|conn| usecases::remove_favorite(conn, user, listing))?;
    Ok(())
}
