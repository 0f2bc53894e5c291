use super::prelude::*;

#[derive(Debug, Clone)]
pub struct UpdateListing {
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
    /// Promotional visibility, applied only for admins and
    /// silently ignored otherwise.
    pub featured: Option<bool>,
}

pub fn update_listing<R: ListingRepo>(
    repo: &R,
    user: &User,
    id: &str,
    update: UpdateListing,
) -> Result<Listing> {
    let mut listing = repo.get_listing(id)?;
    if !listing.status.exists() {
        return Err(Error::Repo(crate::repositories::Error::NotFound));
    }
    if listing.owner != user.email && user.role < Role::Admin {
        return Err(Error::Forbidden);
    }
    let UpdateListing {
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
        featured,
    } = update;
    let title = title.trim().to_owned();
    if title.is_empty() {
        return Err(Error::Title);
    }
    if let Some(slug) = slug {
        let slug = slug.trim().to_owned();
        if slug.is_empty() {
            return Err(Error::Slug);
        }
        if slug != listing.slug {
            if let Some(existing) = repo.try_get_listing_by_slug(&slug)? {
                if existing.status.exists() {
                    return Err(Error::SlugExists);
                }
            }
            listing.slug = slug;
        }
    }
    listing.geo = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::try_new(lat, lng)?),
        (None, None) => None,
        _ => return Err(Error::InvalidPosition),
    };
    listing.title = title;
    listing.description = description;
    listing.category = category;
    listing.city = city;
    listing.address = address;
    listing.price_usd = price_usd;
    listing.eco_tags = eco_tags;
    listing.nomad_features = nomad_features;
    listing.eco_scores = eco_scores;
    if user.role >= Role::Admin {
        if let Some(featured) = featured {
            listing.featured = featured;
        }
    }
    listing.updated_at = Some(TimestampMs::now());
    repo.update_listing(&listing)?;
    Ok(listing)
}
