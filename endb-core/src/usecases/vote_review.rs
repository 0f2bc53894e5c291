use super::prelude::*;

/// Record a helpfulness vote, one per user and review.
///
/// Repeating the identical vote is a no-op; switching the vote
/// moves one count to the other. Only approved reviews are
/// visible, so voting on anything else is not found.
pub fn vote_review<R: ReviewRepo>(
    repo: &R,
    voter: &EmailAddress,
    review_id: &str,
    helpful: bool,
) -> Result<Review> {
    let mut review = repo.get_review(review_id)?;
    if !review.status.is_visible() {
        return Err(Error::Repo(crate::repositories::Error::NotFound));
    }
    match repo.try_get_vote(review_id, voter)? {
        None => {
            let vote = ReviewVote {
                review_id: review.id.clone(),
                voter: voter.clone(),
                helpful,
                created_at: TimestampMs::now(),
            };
            repo.create_vote(&vote)?;
            if helpful {
                review.helpful_count += 1;
            } else {
                review.unhelpful_count += 1;
            }
            repo.update_review(&review)?;
        }
        Some(existing) if existing.helpful == helpful => {
            // Identical repeat vote changes nothing.
        }
        Some(existing) => {
            let switched = ReviewVote {
                helpful,
                created_at: TimestampMs::now(),
                ..existing
            };
            repo.update_vote(&switched)?;
            if helpful {
                review.helpful_count += 1;
                review.unhelpful_count = review.unhelpful_count.saturating_sub(1);
            } else {
                review.unhelpful_count += 1;
                review.helpful_count = review.helpful_count.saturating_sub(1);
            }
            repo.update_review(&review)?;
        }
    }
    Ok(review)
}
