use super::prelude::*;

/// Aggregate over all approved reviews of one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub avg_rating: Option<AvgRatingValue>,
    pub total: u64,
    /// Number of approved reviews per star, index 0 = one star.
    pub distribution: [u64; 5],
}

impl ReviewSummary {
    fn over(reviews: &[Review]) -> Self {
        let mut builder = AvgRatingValueBuilder::default();
        let mut distribution = [0; 5];
        for review in reviews {
            builder.add(review.rating);
            let stars = i8::from(review.rating);
            debug_assert!((1..=5).contains(&stars));
            distribution[(stars - 1) as usize] += 1;
        }
        let total = builder.count() as u64;
        let avg_rating = if total > 0 {
            Some(builder.build())
        } else {
            None
        };
        Self {
            avg_rating,
            total,
            distribution,
        }
    }
}

/// A page of the approved reviews of a listing plus the summary
/// over all of them.
pub fn query_reviews<R: ReviewRepo>(
    repo: &R,
    listing_id: &str,
    sort: SortOption,
    pagination: &Pagination,
) -> Result<(Vec<Review>, ReviewSummary)> {
    let mut reviews = repo.approved_reviews_of_listing(listing_id)?;
    let summary = ReviewSummary::over(&reviews);
    match sort {
        SortOption::Rating => reviews.sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then(b.created_at.cmp(&a.created_at))
        }),
        SortOption::Helpful => reviews.sort_by(|a, b| {
            b.helpful_count
                .cmp(&a.helpful_count)
                .then(b.created_at.cmp(&a.created_at))
        }),
        SortOption::CreatedAt => reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    let offset = pagination.offset.unwrap_or(0) as usize;
    let limit = pagination.limit.map(|l| l as usize).unwrap_or(usize::MAX);
    let page = reviews.into_iter().skip(offset).take(limit).collect();
    Ok((page, summary))
}
