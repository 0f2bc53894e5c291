//! # endb-boundary
//!
//! Serializable, anemic data structures for the EcoNomadDB JSON API.
//!
//! All types are plain data without behavior, the single exception
//! being the pagination metadata that is derived from a total count.

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod entity_conversions;

/// A JSON value that is accepted both as number and as string.
///
/// Clients of the original API send numeric parameters in either
/// representation, so the boundary parses both defensively.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
                Some(*n as u64)
            }
            Self::Number(_) => None,
            Self::String(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => {
                let n = *n;
                (f64::from(i8::MIN)..=f64::from(i8::MAX))
                    .contains(&n)
                    .then_some(n as i8)
            }
            Self::Number(_) => None,
            Self::String(s) => s.trim().parse().ok(),
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", n as i64)
                } else {
                    n.to_string()
                }
            }
            Self::String(s) => s,
        }
    }
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq))]
pub struct EcoScores {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_efficiency     : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_conservation    : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waste_reduction       : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sustainable_materials : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_impact      : Option<f64>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Listing {
    pub id             : String,
    pub slug           : String,
    pub title          : String,
    pub description    : String,
    pub category       : String,
    pub city           : String,
    pub address        : Option<String>,
    pub lat            : Option<f64>,
    pub lng            : Option<f64>,
    pub price_usd      : Option<u32>,
    pub eco_tags       : Vec<String>,
    pub nomad_features : Vec<String>,
    pub eco_scores     : EcoScores,
    pub featured       : bool,
    pub owner          : String,
    pub created_at     : i64,
    pub updated_at     : Option<i64>,
}

/// A listing with its derived scores, as embedded in detail responses.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct ListingDetail {
    #[serde(flatten)]
    pub listing: Listing,
    /// Weighted eco score, absent without any provided sub-score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco_rating: Option<f64>,
    /// Average of the approved review ratings, absent without reviews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    pub review_count: u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        debug_assert!(page >= 1);
        debug_assert!(limit >= 1);
        let total_pages = total.div_ceil(limit);
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Echo of the constraints that were actually applied to a search.
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct AppliedFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub eco_tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub nomad_features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price_usd: Option<u32>,
    pub sort: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct SearchResponse {
    pub listings: Vec<Listing>,
    pub pagination: Pagination,
    pub filters: AppliedFilters,
}

/// One raw `{field, value}` condition of a structured search request.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct FilterCondition {
    pub field: String,
    pub value: NumberOrString,
}

/// Body of `POST /api/search`.
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<NumberOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<NumberOrString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewListing {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub description: String,
    pub category: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<u32>,
    #[serde(default)]
    pub eco_tags: Vec<String>,
    #[serde(default)]
    pub nomad_features: Vec<String>,
    #[serde(default)]
    pub eco_scores: EcoScores,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct UpdateListing {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub description: String,
    pub category: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<u32>,
    #[serde(default)]
    pub eco_tags: Vec<String>,
    #[serde(default)]
    pub nomad_features: Vec<String>,
    #[serde(default)]
    pub eco_scores: EcoScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct ListingCreated {
    pub id: String,
    pub slug: String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Review {
    pub id              : String,
    pub listing_id      : String,
    pub reviewer        : String,
    pub created_at      : i64,
    pub rating          : i8,
    pub comment         : String,
    pub helpful_count   : u32,
    pub unhelpful_count : u32,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewReview {
    pub listing: String,
    pub rating: NumberOrString,
    pub comment: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct ReviewSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    pub total: u64,
    /// Approved reviews per star, index 0 = one star.
    pub distribution: [u64; 5],
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
    pub summary: ReviewSummary,
    pub pagination: Pagination,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
pub struct VoteReview {
    pub helpful: bool,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewFavorite {
    pub listing: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Favorite {
    pub listing: Listing,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct User {
    pub email: String,
    pub role: String,
    pub plan: String,
}

/// Response of all error statuses.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Error {
    pub http_status: u16,
    pub message: String,
}
