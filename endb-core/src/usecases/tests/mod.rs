use std::cell::RefCell;

use crate::{
    db::{ListingQuery, ReviewStats, SortOption},
    entities::*,
    rating::Rated as _,
    repositories::{self, *},
};

type Result<T> = std::result::Result<T, repositories::Error>;

pub fn premium_user(email: &str) -> User {
    User {
        email: email.parse().unwrap(),
        email_confirmed: true,
        password: "secret-password".parse().unwrap(),
        role: Role::User,
        plan: SubscriptionPlan::Premium,
    }
}

/// In-memory fake of all repositories for usecase tests.
#[derive(Debug, Default)]
pub struct MockDb {
    pub listings: RefCell<Vec<Listing>>,
    pub reviews: RefCell<Vec<Review>>,
    pub votes: RefCell<Vec<ReviewVote>>,
    pub users: RefCell<Vec<User>>,
    pub favorites: RefCell<Vec<Favorite>>,
}

impl MockDb {
    pub fn add_listing(&self, listing: Listing) {
        self.listings.borrow_mut().push(listing);
    }

    pub fn add_review(&self, review: Review) {
        self.reviews.borrow_mut().push(review);
    }

    pub fn add_user(&self, user: User) {
        self.users.borrow_mut().push(user);
    }

    fn matches(&self, listing: &Listing, query: &ListingQuery) -> bool {
        if !query.status.contains(&listing.status) {
            return false;
        }
        if let Some(text) = &query.text {
            if !text::any_field_contains([&*listing.title, &*listing.description], text) {
                return false;
            }
        }
        if let Some(category) = query.category {
            if listing.category != category {
                return false;
            }
        }
        if let Some(location) = &query.location {
            let address = listing.address.as_deref().unwrap_or("");
            if !text::any_field_contains([&*listing.city, address], location) {
                return false;
            }
        }
        if !query
            .eco_tags
            .iter()
            .all(|tag| listing.eco_tags.contains(tag))
        {
            return false;
        }
        if !query
            .nomad_features
            .iter()
            .all(|feature| listing.nomad_features.contains(feature))
        {
            return false;
        }
        if let Some(max_price) = query.max_price_usd {
            match listing.price_usd {
                Some(price) if price <= max_price => (),
                _ => return false,
            }
        }
        if let Some(min_rating) = query.min_rating {
            // Listings without approved reviews have an undefined
            // average and never satisfy the threshold.
            let reviews = self
                .approved_reviews_of_listing(listing.id.as_str())
                .unwrap_or_default();
            match listing.avg_rating(&reviews) {
                Some(avg) if avg >= min_rating => (),
                _ => return false,
            }
        }
        true
    }

    fn matching_listings(&self, query: &ListingQuery) -> Vec<Listing> {
        let mut matches: Vec<_> = self
            .listings
            .borrow()
            .iter()
            .filter(|listing| self.matches(listing, query))
            .cloned()
            .collect();
        let stats = self.approved_review_stats().unwrap_or_default();
        let stat_of = |listing: &Listing| {
            stats
                .iter()
                .find(|stat| stat.listing_id == listing.id)
                .cloned()
        };
        match query.sort {
            SortOption::Rating => matches.sort_by(|a, b| {
                let rating = |l: &Listing| {
                    stat_of(l).map(|s| f64::from(s.avg_rating)).unwrap_or(0.0)
                };
                rating(b)
                    .partial_cmp(&rating(a))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(b.created_at.cmp(&a.created_at))
            }),
            SortOption::Helpful => matches.sort_by(|a, b| {
                let helpful = |l: &Listing| stat_of(l).map(|s| s.helpful_total).unwrap_or(0);
                helpful(b)
                    .cmp(&helpful(a))
                    .then(b.created_at.cmp(&a.created_at))
            }),
            SortOption::CreatedAt => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        matches
    }
}

impl ListingRepo for MockDb {
    fn create_listing(&self, listing: &Listing) -> Result<()> {
        if self
            .listings
            .borrow()
            .iter()
            .any(|existing| existing.id == listing.id)
        {
            return Err(repositories::Error::AlreadyExists);
        }
        self.listings.borrow_mut().push(listing.clone());
        Ok(())
    }

    fn update_listing(&self, listing: &Listing) -> Result<()> {
        let mut listings = self.listings.borrow_mut();
        let existing = listings
            .iter_mut()
            .find(|existing| existing.id == listing.id)
            .ok_or(repositories::Error::NotFound)?;
        *existing = listing.clone();
        Ok(())
    }

    fn get_listing(&self, id: &str) -> Result<Listing> {
        self.listings
            .borrow()
            .iter()
            .find(|listing| listing.id.as_str() == id)
            .cloned()
            .ok_or(repositories::Error::NotFound)
    }

    fn get_listings(&self, ids: &[&str]) -> Result<Vec<Listing>> {
        Ok(self
            .listings
            .borrow()
            .iter()
            .filter(|listing| ids.contains(&listing.id.as_str()))
            .cloned()
            .collect())
    }

    fn try_get_listing_by_slug(&self, slug: &str) -> Result<Option<Listing>> {
        // Reused slugs may also appear on soft-deleted listings,
        // the listing that still exists wins the lookup.
        Ok(self
            .listings
            .borrow()
            .iter()
            .filter(|listing| listing.slug == slug)
            .max_by_key(|listing| listing.status)
            .cloned())
    }

    fn query_listings(
        &self,
        query: &ListingQuery,
        pagination: &Pagination,
    ) -> Result<Vec<Listing>> {
        let offset = pagination.offset.unwrap_or(0) as usize;
        let limit = pagination.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(self
            .matching_listings(query)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    fn count_listings(&self, query: &ListingQuery) -> Result<u64> {
        Ok(self.matching_listings(query).len() as u64)
    }

    fn featured_listings(&self, limit: u64) -> Result<Vec<Listing>> {
        let mut featured: Vec<_> = self
            .listings
            .borrow()
            .iter()
            .filter(|listing| listing.featured && listing.is_active())
            .cloned()
            .collect();
        featured.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        featured.truncate(limit as usize);
        Ok(featured)
    }
}

impl ReviewRepo for MockDb {
    fn create_review(&self, review: &Review) -> Result<()> {
        self.reviews.borrow_mut().push(review.clone());
        Ok(())
    }

    fn update_review(&self, review: &Review) -> Result<()> {
        let mut reviews = self.reviews.borrow_mut();
        let existing = reviews
            .iter_mut()
            .find(|existing| existing.id == review.id)
            .ok_or(repositories::Error::NotFound)?;
        *existing = review.clone();
        Ok(())
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        self.reviews
            .borrow()
            .iter()
            .find(|review| review.id.as_str() == id)
            .cloned()
            .ok_or(repositories::Error::NotFound)
    }

    fn approved_reviews_of_listing(&self, listing_id: &str) -> Result<Vec<Review>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .filter(|review| {
                review.listing_id.as_str() == listing_id && review.status.is_visible()
            })
            .cloned()
            .collect())
    }

    fn try_get_review_of_reviewer(
        &self,
        listing_id: &str,
        reviewer: &EmailAddress,
    ) -> Result<Option<Review>> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .find(|review| {
                review.listing_id.as_str() == listing_id && review.reviewer == *reviewer
            })
            .cloned())
    }

    fn count_reviews_of_reviewer_since(
        &self,
        reviewer: &EmailAddress,
        since: TimestampMs,
    ) -> Result<u64> {
        Ok(self
            .reviews
            .borrow()
            .iter()
            .filter(|review| review.reviewer == *reviewer && review.created_at >= since)
            .count() as u64)
    }

    fn approved_review_stats(&self) -> Result<Vec<ReviewStats>> {
        let reviews = self.reviews.borrow();
        let mut stats: Vec<ReviewStats> = vec![];
        for review in reviews.iter().filter(|review| review.status.is_visible()) {
            if stats
                .iter()
                .any(|stat| stat.listing_id == review.listing_id)
            {
                continue;
            }
            let of_listing: Vec<_> = reviews
                .iter()
                .filter(|r| r.listing_id == review.listing_id && r.status.is_visible())
                .collect();
            let mut builder = AvgRatingValueBuilder::default();
            for r in &of_listing {
                builder.add(r.rating);
            }
            stats.push(ReviewStats {
                listing_id: review.listing_id.clone(),
                avg_rating: builder.build(),
                review_count: of_listing.len() as u64,
                helpful_total: of_listing.iter().map(|r| u64::from(r.helpful_count)).sum(),
            });
        }
        Ok(stats)
    }

    fn try_get_vote(&self, review_id: &str, voter: &EmailAddress) -> Result<Option<ReviewVote>> {
        Ok(self
            .votes
            .borrow()
            .iter()
            .find(|vote| vote.review_id.as_str() == review_id && vote.voter == *voter)
            .cloned())
    }

    fn create_vote(&self, vote: &ReviewVote) -> Result<()> {
        if self
            .votes
            .borrow()
            .iter()
            .any(|existing| existing.review_id == vote.review_id && existing.voter == vote.voter)
        {
            return Err(repositories::Error::AlreadyExists);
        }
        self.votes.borrow_mut().push(vote.clone());
        Ok(())
    }

    fn update_vote(&self, vote: &ReviewVote) -> Result<()> {
        let mut votes = self.votes.borrow_mut();
        let existing = votes
            .iter_mut()
            .find(|existing| existing.review_id == vote.review_id && existing.voter == vote.voter)
            .ok_or(repositories::Error::NotFound)?;
        *existing = vote.clone();
        Ok(())
    }
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> Result<()> {
        if self
            .users
            .borrow()
            .iter()
            .any(|existing| existing.email == user.email)
        {
            return Err(repositories::Error::AlreadyExists);
        }
        self.users.borrow_mut().push(user.clone());
        Ok(())
    }

    fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.borrow_mut();
        let existing = users
            .iter_mut()
            .find(|existing| existing.email == user.email)
            .ok_or(repositories::Error::NotFound)?;
        *existing = user.clone();
        Ok(())
    }

    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User> {
        self.try_get_user_by_email(email)?
            .ok_or(repositories::Error::NotFound)
    }

    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .find(|user| user.email == *email)
            .cloned())
    }

    fn count_users(&self) -> Result<usize> {
        Ok(self.users.borrow().len())
    }
}

impl FavoriteRepo for MockDb {
    fn create_favorite(&self, favorite: &Favorite) -> Result<()> {
        if self
            .favorites
            .borrow()
            .iter()
            .any(|existing| {
                existing.user == favorite.user && existing.listing_id == favorite.listing_id
            })
        {
            return Err(repositories::Error::AlreadyExists);
        }
        self.favorites.borrow_mut().push(favorite.clone());
        Ok(())
    }

    fn delete_favorite(&self, user: &EmailAddress, listing_id: &str) -> Result<()> {
        let mut favorites = self.favorites.borrow_mut();
        let len_before = favorites.len();
        favorites.retain(|favorite| {
            !(favorite.user == *user && favorite.listing_id.as_str() == listing_id)
        });
        if favorites.len() == len_before {
            return Err(repositories::Error::NotFound);
        }
        Ok(())
    }

    fn try_get_favorite(
        &self,
        user: &EmailAddress,
        listing_id: &str,
    ) -> Result<Option<Favorite>> {
        Ok(self
            .favorites
            .borrow()
            .iter()
            .find(|favorite| {
                favorite.user == *user && favorite.listing_id.as_str() == listing_id
            })
            .cloned())
    }

    fn favorites_of_user(&self, user: &EmailAddress) -> Result<Vec<Favorite>> {
        let mut favorites: Vec<_> = self
            .favorites
            .borrow()
            .iter()
            .filter(|favorite| favorite.user == *user)
            .cloned()
            .collect();
        favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(favorites)
    }
}

/// In-memory counterpart of the store-level `LIKE '%...%'` matching.
mod text {
    pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }

    pub fn any_field_contains<'a>(
        fields: impl IntoIterator<Item = &'a str>,
        needle: &str,
    ) -> bool {
        fields
            .into_iter()
            .any(|field| contains_ignore_case(field, needle))
    }

    mod tests {
        use super::*;

        #[test]
        fn substring_match_ignores_case() {
            assert!(contains_ignore_case("Green Roast Cafe", "roast"));
            assert!(contains_ignore_case("Green Roast Cafe", "GREEN ro"));
            assert!(!contains_ignore_case("Green Roast Cafe", "espresso"));
        }

        #[test]
        fn match_against_multiple_fields() {
            let fields = ["Solar Hub", "Coworking with rooftop panels"];
            assert!(any_field_contains(fields, "rooftop"));
            assert!(any_field_contains(fields, "solar"));
            assert!(!any_field_contains(fields, "beach"));
        }
    }
}
