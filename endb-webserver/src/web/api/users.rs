use super::*;

use rocket::http::SameSite;

#[post("/login", format = "application/json", data = "<login>")]
pub fn post_login(
    db: sqlite::Connections,
    cookies: &CookieJar<'_>,
    login: JsonResult<json::Credentials>,
) -> Result<json::User> {
    let login = login?.into_inner();
    let credentials = usecases::Credentials {
        email: &login.email.parse()?,
        password: &login.password,
    };
    let user = usecases::login_with_email(&db.shared()?, &credentials).map_err(|err| {
        log::debug!("Login with email '{}' failed: {}", login.email, err);
        err
    })?;
    cookies.add_private(
        Cookie::build((COOKIE_EMAIL_KEY, user.email.as_str().to_owned()))
            .same_site(SameSite::Lax),
    );
    Ok(Json(user.into()))
}

#[post("/logout", format = "application/json")]
pub fn post_logout(cookies: &CookieJar<'_>) -> Json<()> {
    cookies.remove_private(COOKIE_EMAIL_KEY);
    Json(())
}

#[post("/users", format = "application/json", data = "<new_user>")]
pub fn post_user(
    db: sqlite::Connections,
    new_user: JsonResult<json::NewUser>,
) -> Result<json::User> {
    let new_user = from_json::try_new_user(new_user?.into_inner())?;
    let user = flows::register(&db, new_user)?;
    Ok(Json(user.into()))
}

#[get("/users/current", format = "application/json")]
pub fn get_current_user(db: sqlite::Connections, account: Account) -> Result<json::User> {
    let user = account_user(&db.shared()?, &account)?;
    Ok(Json(user.into()))
}
