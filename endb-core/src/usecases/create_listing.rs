use super::prelude::*;

#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub slug: Option<String>,
    pub description: String,
    pub category: Category,
    pub city: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub price_usd: Option<u32>,
    pub eco_tags: Vec<String>,
    pub nomad_features: Vec<String>,
    pub eco_scores: EcoScores,
}

/// Turn a free-form title into a URL-safe slug.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut previous_dash = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            previous_dash = false;
        } else if !previous_dash {
            slug.push('-');
            previous_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// A slug is taken as long as a non-deleted listing uses it.
/// Slugs of soft-deleted listings may be reused.
fn check_slug_is_free<R: ListingRepo>(repo: &R, slug: &str) -> Result<()> {
    if let Some(existing) = repo.try_get_listing_by_slug(slug)? {
        if existing.status.exists() {
            return Err(Error::SlugExists);
        }
    }
    Ok(())
}

pub fn create_listing<R: ListingRepo>(
    repo: &R,
    owner: &User,
    new_listing: NewListing,
) -> Result<Listing> {
    if owner.plan < SubscriptionPlan::Premium {
        return Err(Error::Forbidden);
    }
    let NewListing {
        title,
        slug,
        description,
        category,
        city,
        address,
        lat,
        lng,
        price_usd,
        eco_tags,
        nomad_features,
        eco_scores,
    } = new_listing;
    let title = title.trim().to_owned();
    if title.is_empty() {
        return Err(Error::Title);
    }
    let slug = match slug {
        Some(slug) => slug.trim().to_owned(),
        None => slugify(&title),
    };
    if slug.is_empty() {
        return Err(Error::Slug);
    }
    check_slug_is_free(repo, &slug)?;
    let geo = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::try_new(lat, lng)?),
        (None, None) => None,
        _ => return Err(Error::InvalidPosition),
    };
    let listing = Listing {
        id: Id::new(),
        slug,
        title,
        description,
        category,
        city,
        address,
        geo,
        price_usd,
        eco_tags,
        nomad_features,
        eco_scores,
        status: ListingStatus::default(),
        featured: false,
        owner: owner.email.clone(),
        created_at: TimestampMs::now(),
        updated_at: None,
    };
    log::debug!(
        "Creating new listing '{slug}' owned by {owner}",
        slug = listing.slug,
        owner = listing.owner
    );
    repo.create_listing(&listing)?;
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{premium_user, MockDb},
        *,
    };
    use endb_entities::builders::*;

    fn new_listing(title: &str) -> NewListing {
        NewListing {
            title: title.into(),
            slug: None,
            description: "A place with plenty of plants.".into(),
            category: Category::Cafe,
            city: "Lisbon".into(),
            address: None,
            lat: None,
            lng: None,
            price_usd: Some(12),
            eco_tags: vec!["solar-powered".into()],
            nomad_features: vec!["fast-wifi".into()],
            eco_scores: EcoScores::default(),
        }
    }

    #[test]
    fn slugify_titles() {
        assert_eq!("green-roast-cafe", slugify("Green Roast Cafe"));
        assert_eq!("caf-del-mar", slugify("  Café del Mar!  "));
        assert_eq!("", slugify("!!!"));
    }

    #[test]
    fn create_with_generated_slug() {
        let db = MockDb::default();
        let owner = premium_user("owner@example.com");
        let created = create_listing(&db, &owner, new_listing("Green Roast Cafe")).unwrap();
        assert_eq!("green-roast-cafe", created.slug);
        assert_eq!(ListingStatus::Active, created.status);
        assert!(!created.featured);
        assert!(db.try_get_listing_by_slug("green-roast-cafe").unwrap().is_some());
    }

    #[test]
    fn requires_premium_plan() {
        let db = MockDb::default();
        let mut owner = premium_user("owner@example.com");
        owner.plan = SubscriptionPlan::Free;
        assert!(matches!(
            create_listing(&db, &owner, new_listing("Green Roast Cafe")),
            Err(Error::Forbidden)
        ));
    }

    #[test]
    fn reject_duplicate_slug_of_existing_listing() {
        let db = MockDb::default();
        let owner = premium_user("owner@example.com");
        create_listing(&db, &owner, new_listing("Green Roast Cafe")).unwrap();
        assert!(matches!(
            create_listing(&db, &owner, new_listing("Green Roast Cafe")),
            Err(Error::SlugExists)
        ));
    }

    #[test]
    fn allow_slug_of_deleted_listing() {
        let db = MockDb::default();
        db.add_listing(
            Listing::build()
                .slug("green-roast-cafe")
                .status(ListingStatus::Deleted)
                .finish(),
        );
        let owner = premium_user("owner@example.com");
        assert!(create_listing(&db, &owner, new_listing("Green Roast Cafe")).is_ok());
    }

    #[test]
    fn reject_incomplete_coordinates() {
        let db = MockDb::default();
        let owner = premium_user("owner@example.com");
        let mut listing = new_listing("Green Roast Cafe");
        listing.lat = Some(38.7);
        assert!(matches!(
            create_listing(&db, &owner, listing),
            Err(Error::InvalidPosition)
        ));
    }
}
