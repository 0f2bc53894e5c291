use crate::entities::*;

pub trait Rated {
    /// Average over all approved ratings, `None` if no
    /// approved review exists.
    fn avg_rating(&self, reviews: &[Review]) -> Option<AvgRatingValue>;
}

impl Rated for Listing {
    fn avg_rating(&self, reviews: &[Review]) -> Option<AvgRatingValue> {
        debug_assert_eq!(
            reviews.len(),
            reviews.iter().filter(|r| r.listing_id == self.id).count()
        );
        let builder = reviews
            .iter()
            .filter(|review| review.status.is_visible())
            .fold(AvgRatingValueBuilder::default(), |mut acc, review| {
                acc.add(review.rating);
                acc
            });
        if builder.count() == 0 {
            return None;
        }
        Some(builder.build())
    }
}
