use super::*;

pub fn register(connections: &sqlite::Connections, new_user: usecases::NewUser) -> Result<User> {
    let mut connection = connections.exclusive()?;
    let user = connection.transaction(|conn| usecases::register(conn, new_user))?;
    info!("Registered new user {}", user.email);
    Ok(user)
}
