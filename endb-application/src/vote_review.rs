use super::*;

pub fn vote_review(
    connections: &sqlite::Connections,
    voter: &EmailAddress,
    review_id: &str,
    helpful: bool,
) -> Result<Review> {
    let mut connection = connections.exclusive()?;
    let review =
        connection.transaction(|conn| usecases::vote_review(conn, voter, review_id, helpful))?;
    Ok(review)
}
