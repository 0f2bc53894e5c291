pub use endb_boundary::*;

use endb_core::{entities as e, usecases};

pub mod from_json {
    //! JSON -> Entity

    use super::*;

    use usecases::Error as ParameterError;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the entities both are outside this crate.

    pub fn try_new_listing(l: NewListing) -> Result<usecases::NewListing, ParameterError> {
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
        } = l;
        let category = category
            .parse::<e::Category>()
            .map_err(|_| ParameterError::Category)?;
        Ok(usecases::NewListing {
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
            eco_scores: eco_scores.into(),
        })
    }

    pub fn try_update_listing(l: UpdateListing) -> Result<usecases::UpdateListing, ParameterError> {
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
        } = l;
        let category = category
            .parse::<e::Category>()
            .map_err(|_| ParameterError::Category)?;
        Ok(usecases::UpdateListing {
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
            eco_scores: eco_scores.into(),
            featured,
        })
    }

    pub fn try_new_user(new_user: NewUser) -> Result<usecases::NewUser, ParameterError> {
        let NewUser { email, password } = new_user;
        let email = email.parse::<e::EmailAddress>()?;
        Ok(usecases::NewUser { email, password })
    }
}

pub mod to_json {
    //! Entity -> JSON

    use super::*;

    use endb_core::eco::EcoRated as _;

    pub fn review_summary(summary: usecases::ReviewSummary) -> ReviewSummary {
        let usecases::ReviewSummary {
            avg_rating,
            total,
            distribution,
        } = summary;
        ReviewSummary {
            avg_rating: avg_rating.map(f64::from),
            total,
            distribution,
        }
    }

    pub fn listing_detail(listing: e::Listing, summary: usecases::ReviewSummary) -> ListingDetail {
        let eco_rating = listing.eco_scores.eco_rating().map(f64::from);
        ListingDetail {
            listing: listing.into(),
            eco_rating,
            avg_rating: summary.avg_rating.map(f64::from),
            review_count: summary.total,
        }
    }
}
