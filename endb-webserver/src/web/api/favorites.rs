use super::*;

use rocket::response::status;

#[get("/favorites")]
pub fn get_favorites(db: sqlite::Connections, account: Account) -> Result<Vec<json::Favorite>> {
    let db = db.shared()?;
    let user = account_user(&db, &account)?;
    let favorites = usecases::query_favorites(&db, &user.email)?;
    Ok(Json(favorites.into_iter().map(Into::into).collect()))
}

#[post("/favorites", format = "application/json", data = "<new_favorite>")]
pub fn post_favorite(
    db: sqlite::Connections,
    account: Account,
    new_favorite: JsonResult<json::NewFavorite>,
) -> std::result::Result<status::Created<Json<json::Favorite>>, ApiError> {
    let (user, listing) = {
        let shared = db.shared()?;
        let user = account_user(&shared, &account)?;
        let listing = new_favorite?.into_inner().listing;
        (user, listing)
    };
    let favorite = flows::add_favorite(&db, &user.email, &listing)?;
    let listing = usecases::get_listing(&db.shared()?, favorite.listing_id.as_str())?;
    let location = format!("/api/listings/{}", listing.id);
    Ok(status::Created::new(location).body(Json((favorite, listing).into())))
}

#[delete("/favorites/<id>")]
pub fn delete_favorite(db: sqlite::Connections, account: Account, id: String) -> Result<()> {
    let (user, listing_id) = {
        let shared = db.shared()?;
        let user = account_user(&shared, &account)?;
        // The route accepts a slug as well.
        let listing = usecases::get_listing(&shared, &id)?;
        (user, listing.id)
    };
    flows::remove_favorite(&db, &user.email, listing_id.as_str())?;
    Ok(Json(()))
}
