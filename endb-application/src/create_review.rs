use super::*;

pub fn create_review(
    connections: &sqlite::Connections,
    reviewer: &User,
    new_review: usecases::NewReview,
) -> Result<Review> {
    let mut connection = connections.exclusive()?;
    let review =
        connection.transaction(|conn| usecases::create_review(conn, reviewer, new_review))?;
    if review.status == ReviewStatus::Pending {
        info!(
            "Review {} of listing {} is held back for moderation",
            review.id, review.listing_id
        );
    }
    Ok(review)
}
