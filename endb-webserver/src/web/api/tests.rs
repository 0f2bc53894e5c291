use super::*;

use endb_core::{
    entities::SubscriptionPlan,
    repositories::{ListingRepo as _, UserRepo as _},
};

pub mod prelude {
    use crate::web::{self, api, sqlite};

    pub use crate::web::tests::prelude::*;

    pub fn setup() -> (Client, sqlite::Connections) {
        web::tests::setup(vec![("/", api::routes())])
    }

    pub fn test_json(r: &LocalResponse) {
        assert_eq!(
            r.headers().get("Content-Type").collect::<Vec<_>>()[0],
            "application/json"
        );
    }
}

use self::prelude::*;

fn login(client: &Client, email: &str) {
    let response = client
        .post("/login")
        .header(ContentType::JSON)
        .body(format!(r#"{{"email":"{email}","password":"secret123"}}"#))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
}

fn upgrade_to_premium(pool: &crate::web::sqlite::Connections, email: &str) {
    let db = pool.exclusive().unwrap();
    let mut user = db.get_user_by_email(&email.parse().unwrap()).unwrap();
    user.plan = SubscriptionPlan::Premium;
    db.update_user(&user).unwrap();
}

/// Registers a premium account and logs it in.
fn premium_account(client: &Client, db: &crate::web::sqlite::Connections, email: &str) {
    register_user(db, email, "secret123");
    upgrade_to_premium(db, email);
    login(client, email);
}

fn listing_body(title: &str, price_usd: u32) -> String {
    format!(
        r#"{{"title":"{title}","description":"A calm place to work","category":"cafe","city":"Lisbon","price_usd":{price_usd},"eco_tags":["solar-powered"],"nomad_features":["fast-wifi"],"eco_scores":{{"energy_efficiency":0.9,"community_impact":0.8}}}}"#
    )
}

fn create_listing(client: &Client, title: &str, price_usd: u32) -> json::ListingCreated {
    let response = client
        .post("/listings")
        .header(ContentType::JSON)
        .body(listing_body(title, price_usd))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    serde_json::from_str(&response.into_string().unwrap()).unwrap()
}

fn create_review<'a>(
    client: &'a Client,
    listing: &str,
    rating: u8,
    comment: &str,
) -> LocalResponse<'a> {
    client
        .post("/reviews")
        .header(ContentType::JSON)
        .body(format!(
            r#"{{"listing":"{listing}","rating":{rating},"comment":"{comment}"}}"#
        ))
        .dispatch()
}

#[test]
fn register_login_and_current_user() {
    let (client, _db) = setup();

    let response = client
        .post("/users")
        .header(ContentType::JSON)
        .body(r#"{"email":"nomad@example.com","password":"secret123"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    test_json(&response);
    let user: json::User = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!("nomad@example.com", user.email);
    assert_eq!("user", user.role);
    assert_eq!("free", user.plan);

    // Duplicate registration
    let response = client
        .post("/users")
        .header(ContentType::JSON)
        .body(r#"{"email":"nomad@example.com","password":"secret123"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Conflict);

    // Not logged in yet
    let response = client.get("/users/current").dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    // Wrong password
    let response = client
        .post("/login")
        .header(ContentType::JSON)
        .body(r#"{"email":"nomad@example.com","password":"wrong-password"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    login(&client, "nomad@example.com");
    let response = client.get("/users/current").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let user: json::User = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!("nomad@example.com", user.email);

    let response = client.post("/logout").header(ContentType::JSON).dispatch();
    assert_eq!(response.status(), Status::Ok);
    let response = client.get("/users/current").dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn create_listing_requires_premium_account() {
    let (client, db) = setup();

    // Anonymous
    let response = client
        .post("/listings")
        .header(ContentType::JSON)
        .body(listing_body("Green Roastery", 12))
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    // Free plan
    register_user(&db, "free@example.com", "secret123");
    login(&client, "free@example.com");
    let response = client
        .post("/listings")
        .header(ContentType::JSON)
        .body(listing_body("Green Roastery", 12))
        .dispatch();
    assert_eq!(response.status(), Status::Forbidden);

    premium_account(&client, &db, "owner@example.com");
    let created = create_listing(&client, "Green Roastery", 12);
    assert_eq!("green-roastery", created.slug);

    // The slug is taken now.
    let response = client
        .post("/listings")
        .header(ContentType::JSON)
        .body(listing_body("Green Roastery", 15))
        .dispatch();
    assert_eq!(response.status(), Status::Conflict);
}

#[test]
fn listing_detail_with_derived_scores() {
    let (client, db) = setup();
    premium_account(&client, &db, "owner@example.com");
    let created = create_listing(&client, "Green Roastery", 12);

    register_user(&db, "guest@example.com", "secret123");
    login(&client, "guest@example.com");
    let response = create_review(&client, &created.slug, 4, "Lovely quiet space with great coffee.");
    assert_eq!(response.status(), Status::Ok);

    // Lookup by slug
    let response = client.get("/listings/green-roastery").dispatch();
    assert_eq!(response.status(), Status::Ok);
    test_json(&response);
    let detail: json::ListingDetail =
        serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(created.id, detail.listing.id);
    assert_eq!("Green Roastery", detail.listing.title);
    assert!(detail.eco_rating.is_some());
    assert_eq!(Some(4.0), detail.avg_rating);
    assert_eq!(1, detail.review_count);

    // Unknown ids are not found.
    let response = client.get("/listings/does-not-exist").dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn search_with_pagination() {
    let (client, db) = setup();
    premium_account(&client, &db, "owner@example.com");
    create_listing(&client, "Solar Cafe", 10);
    create_listing(&client, "Rainwater Roasters", 20);
    create_listing(&client, "Upcycled Beans", 30);

    let response = client.get("/search?limit=2").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: json::SearchResponse = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(2, body.listings.len());
    assert_eq!(3, body.pagination.total);
    assert_eq!(2, body.pagination.total_pages);
    assert!(body.pagination.has_next);
    assert!(!body.pagination.has_prev);

    let response = client.get("/search?limit=2&page=2").dispatch();
    let body: json::SearchResponse = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(1, body.listings.len());
    assert!(!body.pagination.has_next);
    assert!(body.pagination.has_prev);

    // Free text over the title
    let response = client.get("/search?query=rainwater").dispatch();
    let body: json::SearchResponse = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(1, body.listings.len());
    assert_eq!("Rainwater Roasters", body.listings[0].title);
}

#[test]
fn structured_search_accepts_numeric_strings() {
    let (client, db) = setup();
    premium_account(&client, &db, "owner@example.com");
    create_listing(&client, "Solar Cafe", 10);
    create_listing(&client, "Rainwater Roasters", 30);

    let response = client
        .post("/search")
        .header(ContentType::JSON)
        .body(
            r#"{"filters":[{"field":"maxPrice","value":"15"},{"field":"category","value":"cafe"}],"limit":"10"}"#,
        )
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: json::SearchResponse = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(1, body.listings.len());
    assert_eq!("Solar Cafe", body.listings[0].title);
    assert_eq!(Some(15), body.filters.max_price_usd);
    assert_eq!(Some("cafe".to_owned()), body.filters.category);
    assert_eq!("created_at", body.filters.sort);
}

#[test]
fn search_by_min_rating_excludes_unreviewed_listings() {
    let (client, db) = setup();
    premium_account(&client, &db, "owner@example.com");
    let reviewed = create_listing(&client, "Solar Cafe", 10);
    create_listing(&client, "Rainwater Roasters", 20);

    register_user(&db, "guest@example.com", "secret123");
    login(&client, "guest@example.com");
    let response = create_review(&client, &reviewed.slug, 5, "Lovely quiet space with great coffee.");
    assert_eq!(response.status(), Status::Ok);

    let response = client.get("/search?minRating=4&sort=rating").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: json::SearchResponse = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(1, body.listings.len());
    assert_eq!(reviewed.id, body.listings[0].id);
    assert_eq!(1, body.pagination.total);
    assert_eq!("rating", body.filters.sort);
}

#[test]
fn featured_listings() {
    let (client, db) = setup();
    premium_account(&client, &db, "owner@example.com");
    create_listing(&client, "Solar Cafe", 10);
    let featured = create_listing(&client, "Rainwater Roasters", 20);
    {
        let db = db.exclusive().unwrap();
        let mut listing = db.get_listing(&featured.id).unwrap();
        listing.featured = true;
        db.update_listing(&listing).unwrap();
    }

    let response = client.get("/listings/featured").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let listings: Vec<json::Listing> =
        serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(1, listings.len());
    assert_eq!(featured.id, listings[0].id);
    assert!(listings[0].featured);
}

#[test]
fn spammy_reviews_are_held_back() {
    let (client, db) = setup();
    premium_account(&client, &db, "owner@example.com");
    let created = create_listing(&client, "Green Roastery", 12);

    register_user(&db, "honest@example.com", "secret123");
    login(&client, "honest@example.com");
    let response = create_review(&client, &created.slug, 5, "Lovely quiet space with great coffee.");
    assert_eq!(response.status(), Status::Ok);

    // A second review of the same listing by the same account
    let response = create_review(&client, &created.slug, 1, "Changed my mind about this place.");
    assert_eq!(response.status(), Status::Conflict);

    register_user(&db, "spammer@example.com", "secret123");
    login(&client, "spammer@example.com");
    let response = create_review(
        &client,
        &created.slug,
        5,
        "CLICK HERE for casino and viagra deals",
    );
    // Accepted, but waiting for moderation.
    assert_eq!(response.status(), Status::Ok);

    let response = client
        .get(format!("/reviews?listing={}", created.id))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: json::ReviewsResponse =
        serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(1, body.reviews.len());
    assert_eq!("honest@example.com", body.reviews[0].reviewer);
    assert_eq!(1, body.summary.total);
    assert_eq!(Some(5.0), body.summary.avg_rating);
    assert_eq!([0, 0, 0, 0, 1], body.summary.distribution);

    // An unparseable rating is rejected before any other check.
    login(&client, "owner@example.com");
    let response = client
        .post("/reviews")
        .header(ContentType::JSON)
        .body(format!(
            r#"{{"listing":"{}","rating":"ten","comment":"A rating that is not a number."}}"#,
            created.slug
        ))
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn reviews_are_rate_limited() {
    let (client, db) = setup();
    premium_account(&client, &db, "owner@example.com");
    let slugs: Vec<_> = ["First Spot", "Second Spot", "Third Spot", "Fourth Spot"]
        .iter()
        .map(|title| create_listing(&client, title, 10).slug)
        .collect();

    register_user(&db, "busy@example.com", "secret123");
    login(&client, "busy@example.com");
    for slug in &slugs[..3] {
        let response = create_review(&client, slug, 4, "Lovely quiet space with great coffee.");
        assert_eq!(response.status(), Status::Ok);
    }
    let response = create_review(&client, &slugs[3], 4, "Lovely quiet space with great coffee.");
    assert_eq!(response.status(), Status::TooManyRequests);
}

#[test]
fn helpfulness_votes_switch() {
    let (client, db) = setup();
    premium_account(&client, &db, "owner@example.com");
    let created = create_listing(&client, "Green Roastery", 12);

    register_user(&db, "reviewer@example.com", "secret123");
    login(&client, "reviewer@example.com");
    let response = create_review(&client, &created.slug, 5, "Lovely quiet space with great coffee.");
    let review: json::Review = serde_json::from_str(&response.into_string().unwrap()).unwrap();

    register_user(&db, "voter@example.com", "secret123");
    login(&client, "voter@example.com");
    let vote = |helpful: bool| {
        let response = client
            .post(format!("/reviews/{}/vote", review.id))
            .header(ContentType::JSON)
            .body(format!(r#"{{"helpful":{helpful}}}"#))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        serde_json::from_str::<json::Review>(&response.into_string().unwrap()).unwrap()
    };

    let voted = vote(true);
    assert_eq!(1, voted.helpful_count);
    assert_eq!(0, voted.unhelpful_count);

    // Repeating the identical vote is a no-op.
    let voted = vote(true);
    assert_eq!(1, voted.helpful_count);
    assert_eq!(0, voted.unhelpful_count);

    // Switching moves the count.
    let voted = vote(false);
    assert_eq!(0, voted.helpful_count);
    assert_eq!(1, voted.unhelpful_count);
}

#[test]
fn favorites_roundtrip() {
    let (client, db) = setup();

    let response = client.get("/favorites").dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    premium_account(&client, &db, "owner@example.com");
    let created = create_listing(&client, "Green Roastery", 12);

    register_user(&db, "fan@example.com", "secret123");
    login(&client, "fan@example.com");
    let response = client
        .post("/favorites")
        .header(ContentType::JSON)
        .body(format!(r#"{{"listing":"{}"}}"#, created.slug))
        .dispatch();
    assert_eq!(response.status(), Status::Created);
    assert_eq!(
        Some(format!("/api/listings/{}", created.id).as_str()),
        response.headers().get_one("Location")
    );
    let favorite: json::Favorite = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(created.id, favorite.listing.id);

    let response = client
        .post("/favorites")
        .header(ContentType::JSON)
        .body(format!(r#"{{"listing":"{}"}}"#, created.slug))
        .dispatch();
    assert_eq!(response.status(), Status::Conflict);

    let response = client.get("/favorites").dispatch();
    let favorites: Vec<json::Favorite> =
        serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!(1, favorites.len());

    let response = client
        .delete(format!("/favorites/{}", created.slug))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let response = client.get("/favorites").dispatch();
    let favorites: Vec<json::Favorite> =
        serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert!(favorites.is_empty());

    let response = client
        .delete(format!("/favorites/{}", created.slug))
        .dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn only_owner_or_admin_updates_or_deletes() {
    let (client, db) = setup();
    premium_account(&client, &db, "owner@example.com");
    let created = create_listing(&client, "Green Roastery", 12);

    let update_body = r#"{"title":"Green Roastery","description":"Now with oat milk","category":"cafe","city":"Lisbon","price_usd":14}"#;

    register_user(&db, "other@example.com", "secret123");
    login(&client, "other@example.com");
    let response = client
        .put(format!("/listings/{}", created.id))
        .header(ContentType::JSON)
        .body(update_body)
        .dispatch();
    assert_eq!(response.status(), Status::Forbidden);
    let response = client.delete(format!("/listings/{}", created.id)).dispatch();
    assert_eq!(response.status(), Status::Forbidden);

    login(&client, "owner@example.com");
    let response = client
        .put(format!("/listings/{}", created.id))
        .header(ContentType::JSON)
        .body(update_body)
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let updated: json::Listing = serde_json::from_str(&response.into_string().unwrap()).unwrap();
    assert_eq!("Now with oat milk", updated.description);
    assert!(updated.updated_at.is_some());

    let response = client.delete(format!("/listings/{}", created.id)).dispatch();
    assert_eq!(response.status(), Status::Ok);
    let response = client.get(format!("/listings/{}", created.id)).dispatch();
    assert_eq!(response.status(), Status::NotFound);
}
