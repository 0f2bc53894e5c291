use super::*;

use endb_core::db::SortOption;

#[get("/reviews?<listing>&<sort>&<page>&<limit>")]
pub fn get_reviews(
    db: sqlite::Connections,
    listing: String,
    sort: Option<String>,
    page: Option<u64>,
    limit: Option<u64>,
) -> Result<json::ReviewsResponse> {
    let db = db.shared()?;
    // Resolves a slug and rejects deleted listings.
    let listing = usecases::get_listing(&db, &listing)?;
    let sort = SortOption::from_wire_name(sort.as_deref().unwrap_or(""));
    let page = usecases::clamp_page(page);
    let limit = usecases::clamp_limit(limit);
    let pagination = usecases::page_to_pagination(page, limit);
    let (reviews, summary) = usecases::query_reviews(&db, listing.id.as_str(), sort, &pagination)?;
    Ok(Json(json::ReviewsResponse {
        reviews: reviews.into_iter().map(Into::into).collect(),
        pagination: json::Pagination::new(page, limit, summary.total),
        summary: to_json::review_summary(summary),
    }))
}

#[post("/reviews", format = "application/json", data = "<new_review>")]
pub fn post_review(
    db: sqlite::Connections,
    account: Account,
    new_review: JsonResult<json::NewReview>,
) -> Result<json::Review> {
    let reviewer = account_user(&db.shared()?, &account)?;
    let json::NewReview {
        listing,
        rating,
        comment,
    } = new_review?.into_inner();
    let new_review = usecases::NewReview {
        listing,
        // Out of range is rejected by the use case.
        rating: rating.as_i8().unwrap_or(0),
        comment,
    };
    let review = flows::create_review(&db, &reviewer, new_review)?;
    Ok(Json(review.into()))
}

#[post("/reviews/<id>/vote", format = "application/json", data = "<vote>")]
pub fn post_review_vote(
    db: sqlite::Connections,
    account: Account,
    id: String,
    vote: JsonResult<json::VoteReview>,
) -> Result<json::Review> {
    let voter = account_user(&db.shared()?, &account)?;
    let vote = vote?.into_inner();
    let review = flows::vote_review(&db, &voter.email, &id, vote.helpful)?;
    Ok(Json(review.into()))
}
