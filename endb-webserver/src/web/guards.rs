use rocket::{
    self,
    http::Status,
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
};

use endb_application::error::AppError;
use endb_core::{
    entities::{EmailAddress, User},
    repositories::UserRepo,
    usecases::Error as ParameterError,
};

pub const COOKIE_EMAIL_KEY: &str = "econdb-user-email";

type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub struct Auth {
    account_email: Option<String>,
}

impl Auth {
    pub fn account_email(&self) -> Result<&str> {
        self.account_email
            .as_deref()
            .ok_or_else(|| ParameterError::Unauthorized.into())
    }

    fn account_email_from_cookie(request: &Request) -> Option<String> {
        request
            .cookies()
            .get_private(COOKIE_EMAIL_KEY)
            .and_then(|cookie| cookie.value().parse().ok())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let account_email = Self::account_email_from_cookie(request);
        Outcome::Success(Self { account_email })
    }
}

#[derive(Debug)]
pub struct Account(String);

impl Account {
    pub fn email(&self) -> &str {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Account {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth = try_outcome!(Auth::from_request(request).await);
        match auth.account_email() {
            Ok(email) => Outcome::Success(Account(email.to_owned())),
            _ => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

/// Looks up the user account behind a session cookie.
///
/// The cookie is signed, so a valid cookie with no matching user can
/// only mean the account has been deleted in the meantime.
pub fn account_user<R>(repo: &R, account: &Account) -> Result<User>
where
    R: UserRepo,
{
    let email = EmailAddress::new_unchecked(account.email().to_owned());
    repo.try_get_user_by_email(&email)?
        .ok_or_else(|| ParameterError::Unauthorized.into())
}
