use crate::{entities::*, repositories::*};

pub trait Db: ListingRepo + ReviewRepo + UserRepo + FavoriteRepo {}

impl<T> Db for T where T: ListingRepo + ReviewRepo + UserRepo + FavoriteRepo {}

/// How a page of search results is ordered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    /// Average approved rating, best first.
    Rating,
    /// Total helpful votes over approved reviews, most first.
    Helpful,
    /// Creation time, newest first.
    #[default]
    CreatedAt,
}

impl SortOption {
    /// Parse a wire name, falling back to the default for
    /// anything unknown.
    pub fn from_wire_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "rating" => Self::Rating,
            "helpful" => Self::Helpful,
            "created_at" | "createdat" | "newest" => Self::CreatedAt,
            unknown => {
                if !unknown.is_empty() {
                    log::warn!("Unknown sort option '{name}' - using default");
                }
                Self::default()
            }
        }
    }

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Helpful => "helpful",
            Self::CreatedAt => "created_at",
        }
    }

    /// Sorting by rating or helpfulness depends on the
    /// per-listing review aggregation.
    pub const fn needs_review_stats(self) -> bool {
        matches!(self, Self::Rating | Self::Helpful)
    }
}

/// Store-level representation of a single search request.
///
/// All criteria are combined conjunctively. The only implicit
/// criterion is the review status: `status` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub status: Vec<ListingStatus>,
    pub text: Option<String>,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub eco_tags: Vec<String>,
    pub nomad_features: Vec<String>,
    pub min_rating: Option<AvgRatingValue>,
    pub max_price_usd: Option<u32>,
    pub sort: SortOption,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            status: vec![ListingStatus::Active],
            text: None,
            category: None,
            location: None,
            eco_tags: vec![],
            nomad_features: vec![],
            min_rating: None,
            max_price_usd: None,
            sort: SortOption::default(),
        }
    }
}

impl ListingQuery {
    /// Whether answering the query requires joining the
    /// aggregated review data (two-phase query).
    pub fn needs_review_stats(&self) -> bool {
        self.min_rating.is_some() || self.sort.needs_review_stats()
    }
}

/// Derived aggregate over the approved reviews of one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewStats {
    pub listing_id: Id,
    pub avg_rating: AvgRatingValue,
    pub review_count: u64,
    pub helpful_total: u64,
}
