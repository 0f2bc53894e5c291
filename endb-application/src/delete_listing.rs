use super::*;

pub fn delete_listing(connections: &sqlite::Connections, user: &User, id: &str) -> Result<()> {
    let mut connection = connections.exclusive()?;
    connection.transaction(|conn| usecases::delete_listing(conn, user, id))?;
    info!("Deleted listing {id}");
    Ok(())
}
