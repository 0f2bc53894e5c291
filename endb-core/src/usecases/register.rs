use super::prelude::*;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password: String,
}

pub fn register<R: UserRepo>(repo: &R, new_user: NewUser) -> Result<User> {
    let NewUser { email, password } = new_user;
    let password = password.parse::<Password>()?;
    if repo.try_get_user_by_email(&email)?.is_some() {
        return Err(Error::UserExists);
    }
    let user = User {
        email,
        // No confirmation mails are sent, accounts are usable right away.
        email_confirmed: true,
        password,
        role: Role::User,
        plan: SubscriptionPlan::Free,
    };
    log::debug!("Creating new user: email = {}", user.email);
    repo.create_user(&user)?;
    Ok(user)
}
