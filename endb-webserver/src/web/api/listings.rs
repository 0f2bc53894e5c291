use super::*;

use endb_core::repositories::Pagination;

#[get("/listings/featured")]
pub fn get_featured_listings(db: sqlite::Connections) -> Result<Vec<json::Listing>> {
    let listings = usecases::featured_listings(&db.shared()?)?;
    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

#[get("/listings/<id>", rank = 2)]
pub fn get_listing(db: sqlite::Connections, id: String) -> Result<json::ListingDetail> {
    let db = db.shared()?;
    let listing = usecases::get_listing(&db, &id)?;
    // Only the summary is needed here, not a page of reviews.
    let (_, summary) = usecases::query_reviews(
        &db,
        listing.id.as_str(),
        Default::default(),
        &Pagination {
            offset: None,
            limit: Some(0),
        },
    )?;
    Ok(Json(to_json::listing_detail(listing, summary)))
}

#[post("/listings", format = "application/json", data = "<new_listing>")]
pub fn post_listing(
    db: sqlite::Connections,
    account: Account,
    new_listing: JsonResult<json::NewListing>,
) -> Result<json::ListingCreated> {
    let owner = account_user(&db.shared()?, &account)?;
    let new_listing = from_json::try_new_listing(new_listing?.into_inner())?;
    let listing = flows::create_listing(&db, &owner, new_listing)?;
    Ok(Json(json::ListingCreated {
        id: listing.id.to_string(),
        slug: listing.slug,
    }))
}

#[put("/listings/<id>", format = "application/json", data = "<update>")]
pub fn put_listing(
    db: sqlite::Connections,
    account: Account,
    id: String,
    update: JsonResult<json::UpdateListing>,
) -> Result<json::Listing> {
    let user = account_user(&db.shared()?, &account)?;
    let update = from_json::try_update_listing(update?.into_inner())?;
    let listing = flows::update_listing(&db, &user, &id, update)?;
    Ok(Json(listing.into()))
}

#[delete("/listings/<id>")]
pub fn delete_listing(db: sqlite::Connections, account: Account, id: String) -> Result<()> {
    let user = account_user(&db.shared()?, &account)?;
    flows::delete_listing(&db, &user, &id)?;
    Ok(Json(()))
}
