use super::prelude::*;

pub struct Credentials<'a> {
    pub email: &'a EmailAddress,
    pub password: &'a str,
}

/// Verify the credentials and return the account.
///
/// Unknown addresses and wrong passwords are indistinguishable
/// to the caller so that login does not reveal whether an email
/// is registered.
pub fn login_with_email<R: UserRepo>(repo: &R, login: &Credentials) -> Result<User> {
    repo.try_get_user_by_email(login.email)
        .map_err(Error::Repo)
        .and_then(|user| match user {
            Some(user) if user.password.verify(login.password) => Ok(user),
            Some(_) | None => Err(Error::Credentials),
        })
}
