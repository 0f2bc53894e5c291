pub mod prelude {
    pub use endb_core::{
        db::*,
        entities::*,
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{error::AppError, prelude as flows};
    pub use endb_core::usecases::Error as BError;

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            endb_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap());
            Self { db_connections }
        }

        pub fn create_user(&self, email: &str, plan: SubscriptionPlan) -> User {
            let new_user = usecases::NewUser {
                email: email.parse().unwrap(),
                password: "secret123".into(),
            };
            let user = flows::register(&self.db_connections, new_user).unwrap();
            if plan == user.plan {
                return user;
            }
            let user = User { plan, ..user };
            let mut connection = self.db_connections.exclusive().unwrap();
            connection.transaction(|db| db.update_user(&user)).unwrap();
            user
        }
    }

    pub fn default_new_listing() -> usecases::NewListing {
        usecases::NewListing {
            title: "Green Roastery".into(),
            slug: None,
            description: "Solar powered specialty coffee with fast wifi".into(),
            category: Category::Cafe,
            city: "Lisbon".into(),
            address: None,
            lat: None,
            lng: None,
            price_usd: Some(12),
            eco_tags: vec!["solar".into()],
            nomad_features: vec!["wifi".into()],
            eco_scores: EcoScores::default(),
        }
    }

    pub fn default_new_review(listing: &str, comment: &str) -> usecases::NewReview {
        usecases::NewReview {
            listing: listing.into(),
            rating: 5,
            comment: comment.into(),
        }
    }
}

use prelude::*;

#[test]
fn register_and_reject_duplicate_accounts() {
    let fixture = BackendFixture::new();
    fixture.create_user("nomad@example.com", SubscriptionPlan::Free);
    let duplicate = usecases::NewUser {
        email: "nomad@example.com".parse().unwrap(),
        password: "othersecret".into(),
    };
    assert!(matches!(
        flows::register(&fixture.db_connections, duplicate),
        Err(AppError::Business(BError::UserExists))
    ));
}

#[test]
fn create_listing_requires_premium_plan() {
    let fixture = BackendFixture::new();
    let free = fixture.create_user("free@example.com", SubscriptionPlan::Free);
    assert!(matches!(
        flows::create_listing(&fixture.db_connections, &free, default_new_listing()),
        Err(AppError::Business(BError::Forbidden))
    ));

    let premium = fixture.create_user("premium@example.com", SubscriptionPlan::Premium);
    let listing =
        flows::create_listing(&fixture.db_connections, &premium, default_new_listing()).unwrap();
    assert_eq!("green-roastery", listing.slug);

    // The listing is immediately visible, by id and by slug.
    let db = fixture.db_connections.shared().unwrap();
    assert_eq!(
        listing,
        usecases::get_listing(&db, "green-roastery").unwrap()
    );
    assert_eq!(
        listing,
        usecases::get_listing(&db, listing.id.as_str()).unwrap()
    );
}

#[test]
fn soft_deleted_listings_disappear() {
    let fixture = BackendFixture::new();
    let owner = fixture.create_user("owner@example.com", SubscriptionPlan::Premium);
    let listing =
        flows::create_listing(&fixture.db_connections, &owner, default_new_listing()).unwrap();

    flows::delete_listing(&fixture.db_connections, &owner, listing.id.as_str()).unwrap();

    let db = fixture.db_connections.shared().unwrap();
    assert!(matches!(
        usecases::get_listing(&db, listing.id.as_str()),
        Err(BError::Repo(RepoError::NotFound))
    ));
    assert_eq!(
        0,
        usecases::count_listings(&db, &ListingQuery::default()).unwrap()
    );
    drop(db);

    // Deleting twice is not found either.
    assert!(matches!(
        flows::delete_listing(&fixture.db_connections, &owner, listing.id.as_str()),
        Err(AppError::Business(BError::Repo(RepoError::NotFound)))
    ));
}

#[test]
fn reuse_slug_of_soft_deleted_listing() {
    let fixture = BackendFixture::new();
    let owner = fixture.create_user("owner@example.com", SubscriptionPlan::Premium);
    let first =
        flows::create_listing(&fixture.db_connections, &owner, default_new_listing()).unwrap();
    flows::delete_listing(&fixture.db_connections, &owner, first.id.as_str()).unwrap();

    // The slug is free again and resolves to the new listing.
    let second =
        flows::create_listing(&fixture.db_connections, &owner, default_new_listing()).unwrap();
    assert_eq!(first.slug, second.slug);
    assert_ne!(first.id, second.id);

    let db = fixture.db_connections.shared().unwrap();
    assert_eq!(second, usecases::get_listing(&db, "green-roastery").unwrap());
}

#[test]
fn only_owner_or_admin_may_update() {
    let fixture = BackendFixture::new();
    let owner = fixture.create_user("owner@example.com", SubscriptionPlan::Premium);
    let listing =
        flows::create_listing(&fixture.db_connections, &owner, default_new_listing()).unwrap();

    let update = usecases::UpdateListing {
        title: "Greener Roastery".into(),
        slug: None,
        description: listing.description.clone(),
        category: listing.category,
        city: listing.city.clone(),
        address: None,
        lat: None,
        lng: None,
        price_usd: listing.price_usd,
        eco_tags: listing.eco_tags.clone(),
        nomad_features: listing.nomad_features.clone(),
        eco_scores: listing.eco_scores,
        featured: None,
    };

    let other = fixture.create_user("other@example.com", SubscriptionPlan::Premium);
    assert!(matches!(
        flows::update_listing(
            &fixture.db_connections,
            &other,
            listing.id.as_str(),
            update.clone()
        ),
        Err(AppError::Business(BError::Forbidden))
    ));

    let updated = flows::update_listing(
        &fixture.db_connections,
        &owner,
        listing.id.as_str(),
        update,
    )
    .unwrap();
    assert_eq!("Greener Roastery", updated.title);
    assert!(updated.updated_at.is_some());
}

#[test]
fn moderate_spammy_reviews() {
    let fixture = BackendFixture::new();
    let owner = fixture.create_user("owner@example.com", SubscriptionPlan::Premium);
    let listing =
        flows::create_listing(&fixture.db_connections, &owner, default_new_listing()).unwrap();

    let reviewer = fixture.create_user("reviewer@example.com", SubscriptionPlan::Free);
    let clean = flows::create_review(
        &fixture.db_connections,
        &reviewer,
        default_new_review(listing.id.as_str(), "Lovely quiet space with great coffee."),
    )
    .unwrap();
    assert_eq!(ReviewStatus::Approved, clean.status);

    let spammer = fixture.create_user("spammer@example.com", SubscriptionPlan::Free);
    let spam = flows::create_review(
        &fixture.db_connections,
        &spammer,
        default_new_review(listing.id.as_str(), "CLICK HERE for casino and viagra deals"),
    )
    .unwrap();
    assert_eq!(ReviewStatus::Pending, spam.status);

    // Only the approved review is visible and counted.
    let db = fixture.db_connections.shared().unwrap();
    let (reviews, summary) = usecases::query_reviews(
        &db,
        listing.id.as_str(),
        SortOption::default(),
        &Pagination::default(),
    )
    .unwrap();
    assert_eq!(1, reviews.len());
    assert_eq!(clean.id, reviews[0].id);
    assert_eq!(1, summary.total);
    assert_eq!(Some(5.0.into()), summary.avg_rating);
}

#[test]
fn one_review_per_listing_and_reviewer() {
    let fixture = BackendFixture::new();
    let owner = fixture.create_user("owner@example.com", SubscriptionPlan::Premium);
    let listing =
        flows::create_listing(&fixture.db_connections, &owner, default_new_listing()).unwrap();

    let reviewer = fixture.create_user("reviewer@example.com", SubscriptionPlan::Free);
    flows::create_review(
        &fixture.db_connections,
        &reviewer,
        default_new_review(listing.id.as_str(), "Lovely quiet space with great coffee."),
    )
    .unwrap();
    assert!(matches!(
        flows::create_review(
            &fixture.db_connections,
            &reviewer,
            default_new_review(listing.id.as_str(), "Still a lovely quiet space."),
        ),
        Err(AppError::Business(BError::ReviewExists))
    ));
}

#[test]
fn switch_helpfulness_vote() {
    let fixture = BackendFixture::new();
    let owner = fixture.create_user("owner@example.com", SubscriptionPlan::Premium);
    let listing =
        flows::create_listing(&fixture.db_connections, &owner, default_new_listing()).unwrap();
    let reviewer = fixture.create_user("reviewer@example.com", SubscriptionPlan::Free);
    let review = flows::create_review(
        &fixture.db_connections,
        &reviewer,
        default_new_review(listing.id.as_str(), "Lovely quiet space with great coffee."),
    )
    .unwrap();

    let voter = fixture.create_user("voter@example.com", SubscriptionPlan::Free);
    let voted = flows::vote_review(
        &fixture.db_connections,
        &voter.email,
        review.id.as_str(),
        true,
    )
    .unwrap();
    assert_eq!((1, 0), (voted.helpful_count, voted.unhelpful_count));

    // Repeating the identical vote changes nothing.
    let voted = flows::vote_review(
        &fixture.db_connections,
        &voter.email,
        review.id.as_str(),
        true,
    )
    .unwrap();
    assert_eq!((1, 0), (voted.helpful_count, voted.unhelpful_count));

    // Switching the vote moves the count.
    let voted = flows::vote_review(
        &fixture.db_connections,
        &voter.email,
        review.id.as_str(),
        false,
    )
    .unwrap();
    assert_eq!((0, 1), (voted.helpful_count, voted.unhelpful_count));
}

#[test]
fn favorites_roundtrip() {
    let fixture = BackendFixture::new();
    let owner = fixture.create_user("owner@example.com", SubscriptionPlan::Premium);
    let listing =
        flows::create_listing(&fixture.db_connections, &owner, default_new_listing()).unwrap();

    let user = fixture.create_user("nomad@example.com", SubscriptionPlan::Free);
    flows::add_favorite(&fixture.db_connections, &user.email, "green-roastery").unwrap();
    assert!(matches!(
        flows::add_favorite(&fixture.db_connections, &user.email, listing.id.as_str()),
        Err(AppError::Business(BError::FavoriteExists))
    ));

    let db = fixture.db_connections.shared().unwrap();
    let favorites = usecases::query_favorites(&db, &user.email).unwrap();
    assert_eq!(1, favorites.len());
    assert_eq!(listing.id, favorites[0].1.id);
    drop(db);

    flows::remove_favorite(&fixture.db_connections, &user.email, listing.id.as_str()).unwrap();
    assert!(matches!(
        flows::remove_favorite(&fixture.db_connections, &user.email, listing.id.as_str()),
        Err(AppError::Business(BError::Repo(RepoError::NotFound)))
    ));
}

#[test]
fn search_with_min_rating_excludes_unreviewed_listings() {
    let fixture = BackendFixture::new();
    let owner = fixture.create_user("owner@example.com", SubscriptionPlan::Premium);
    let reviewed =
        flows::create_listing(&fixture.db_connections, &owner, default_new_listing()).unwrap();
    let unreviewed = flows::create_listing(
        &fixture.db_connections,
        &owner,
        usecases::NewListing {
            title: "Quiet Hub".into(),
            ..default_new_listing()
        },
    )
    .unwrap();

    let reviewer = fixture.create_user("reviewer@example.com", SubscriptionPlan::Free);
    flows::create_review(
        &fixture.db_connections,
        &reviewer,
        default_new_review(reviewed.id.as_str(), "Lovely quiet space with great coffee."),
    )
    .unwrap();

    let query = ListingQuery {
        min_rating: Some(4.0.into()),
        sort: SortOption::Rating,
        ..Default::default()
    };
    let db = fixture.db_connections.shared().unwrap();
    let hits = usecases::search_listings(&db, &query, &Pagination::default()).unwrap();
    assert_eq!(1, hits.len());
    assert_eq!(reviewed.id, hits[0].id);
    assert_ne!(unreviewed.id, hits[0].id);
    assert_eq!(1, usecases::count_listings(&db, &query).unwrap());
}
