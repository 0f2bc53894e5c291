//! Mapping between serializable boundary types and their
//! corresponding entities.

use endb_entities as e;

use crate::*;

impl From<e::eco::EcoScores> for EcoScores {
    fn from(from: e::eco::EcoScores) -> Self {
        let e::eco::EcoScores {
            energy_efficiency,
            water_conservation,
            waste_reduction,
            sustainable_materials,
            community_impact,
        } = from;
        Self {
            energy_efficiency,
            water_conservation,
            waste_reduction,
            sustainable_materials,
            community_impact,
        }
    }
}

impl From<EcoScores> for e::eco::EcoScores {
    fn from(from: EcoScores) -> Self {
        let EcoScores {
            energy_efficiency,
            water_conservation,
            waste_reduction,
            sustainable_materials,
            community_impact,
        } = from;
        Self {
            energy_efficiency,
            water_conservation,
            waste_reduction,
            sustainable_materials,
            community_impact,
        }
    }
}

impl From<e::listing::Listing> for Listing {
    fn from(from: e::listing::Listing) -> Self {
        let e::listing::Listing {
            id,
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
            status: _,
            featured,
            owner,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.into(),
            slug,
            title,
            description,
            category: category.to_string(),
            city,
            address,
            lat: geo.map(|g| g.lat()),
            lng: geo.map(|g| g.lng()),
            price_usd,
            eco_tags,
            nomad_features,
            eco_scores: eco_scores.into(),
            featured,
            owner: owner.to_string(),
            created_at: created_at.into_milliseconds(),
            updated_at: updated_at.map(e::time::TimestampMs::into_milliseconds),
        }
    }
}

impl From<e::review::Review> for Review {
    fn from(from: e::review::Review) -> Self {
        let e::review::Review {
            id,
            listing_id,
            reviewer,
            created_at,
            rating,
            comment,
            status: _,
            helpful_count,
            unhelpful_count,
        } = from;
        Self {
            id: id.into(),
            listing_id: listing_id.into(),
            reviewer: reviewer.to_string(),
            created_at: created_at.into_milliseconds(),
            rating: rating.into(),
            comment,
            helpful_count,
            unhelpful_count,
        }
    }
}

impl From<e::user::User> for User {
    fn from(from: e::user::User) -> Self {
        let e::user::User {
            email,
            email_confirmed: _,
            password: _,
            role,
            plan,
        } = from;
        Self {
            email: email.to_string(),
            role: role.to_string(),
            plan: plan.to_string(),
        }
    }
}

impl From<(e::favorite::Favorite, e::listing::Listing)> for Favorite {
    fn from((favorite, listing): (e::favorite::Favorite, e::listing::Listing)) -> Self {
        Self {
            listing: listing.into(),
            created_at: favorite.created_at.into_milliseconds(),
        }
    }
}
