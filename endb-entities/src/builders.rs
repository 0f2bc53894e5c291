pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{listing_builder::*, review_builder::*};

pub mod listing_builder {

    use super::*;
    use crate::{category::*, eco::*, email::*, id::*, listing::*, time::*};

    #[derive(Debug)]
    pub struct ListingBuild {
        listing: Listing,
    }

    impl ListingBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.listing.id = id.into();
            self
        }
        pub fn slug(mut self, slug: &str) -> Self {
            self.listing.slug = slug.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.listing.title = title.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.listing.description = desc.into();
            self
        }
        pub fn category(mut self, category: Category) -> Self {
            self.listing.category = category;
            self
        }
        pub fn city(mut self, city: &str) -> Self {
            self.listing.city = city.into();
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.listing.address = Some(address.into());
            self
        }
        pub fn price_usd(mut self, price_usd: u32) -> Self {
            self.listing.price_usd = Some(price_usd);
            self
        }
        pub fn eco_tags(mut self, tags: Vec<impl Into<String>>) -> Self {
            self.listing.eco_tags = tags.into_iter().map(|x| x.into()).collect();
            self
        }
        pub fn nomad_features(mut self, features: Vec<impl Into<String>>) -> Self {
            self.listing.nomad_features = features.into_iter().map(|x| x.into()).collect();
            self
        }
        pub fn eco_scores(mut self, scores: EcoScores) -> Self {
            self.listing.eco_scores = scores;
            self
        }
        pub fn status(mut self, status: ListingStatus) -> Self {
            self.listing.status = status;
            self
        }
        pub fn featured(mut self, featured: bool) -> Self {
            self.listing.featured = featured;
            self
        }
        pub fn owner(mut self, owner: &str) -> Self {
            self.listing.owner = owner.parse().unwrap();
            self
        }
        pub fn finish(self) -> Listing {
            self.listing
        }
    }

    impl Builder for Listing {
        type Build = ListingBuild;
        fn build() -> ListingBuild {
            ListingBuild {
                listing: Listing {
                    id: Id::new(),
                    slug: "".into(),
                    title: "".into(),
                    description: "".into(),
                    category: Category::Coworking,
                    city: "".into(),
                    address: None,
                    geo: None,
                    price_usd: None,
                    eco_tags: vec![],
                    nomad_features: vec![],
                    eco_scores: EcoScores::default(),
                    status: ListingStatus::default(),
                    featured: false,
                    owner: EmailAddress::new_unchecked("owner@example.com".into()),
                    created_at: TimestampMs::now(),
                    updated_at: None,
                },
            }
        }
    }
}

pub mod review_builder {

    use super::*;
    use crate::{email::*, id::*, rating::*, review::*, time::*};

    #[derive(Debug)]
    pub struct ReviewBuild {
        review: Review,
    }

    impl ReviewBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.review.id = id.into();
            self
        }
        pub fn listing_id(mut self, id: &str) -> Self {
            self.review.listing_id = id.into();
            self
        }
        pub fn reviewer(mut self, reviewer: &str) -> Self {
            self.review.reviewer = reviewer.parse().unwrap();
            self
        }
        pub fn rating(mut self, rating: i8) -> Self {
            self.review.rating = RatingValue::new(rating);
            self
        }
        pub fn comment(mut self, comment: &str) -> Self {
            self.review.comment = comment.into();
            self
        }
        pub fn status(mut self, status: ReviewStatus) -> Self {
            self.review.status = status;
            self
        }
        pub fn helpful_count(mut self, count: u32) -> Self {
            self.review.helpful_count = count;
            self
        }
        pub fn created_at(mut self, at: TimestampMs) -> Self {
            self.review.created_at = at;
            self
        }
        pub fn finish(self) -> Review {
            self.review
        }
    }

    impl Builder for Review {
        type Build = ReviewBuild;
        fn build() -> ReviewBuild {
            ReviewBuild {
                review: Review {
                    id: Id::new(),
                    listing_id: Id::new(),
                    reviewer: EmailAddress::new_unchecked("reviewer@example.com".into()),
                    created_at: TimestampMs::now(),
                    rating: RatingValue::new(5),
                    comment: "A solid place to work and sip coffee.".into(),
                    status: ReviewStatus::Approved,
                    helpful_count: 0,
                    unhelpful_count: 0,
                },
            }
        }
    }
}
