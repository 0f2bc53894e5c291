use std::str::FromStr;

use crate::{
    db::{ListingQuery, SortOption},
    entities::*,
};

/// The closed set of filterable fields.
///
/// Wire names are matched case-insensitively; anything else is
/// dropped at the parse boundary instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Category,
    Location,
    EcoTags,
    NomadFeatures,
    MinRating,
    MaxPriceRange,
}

impl FilterField {
    pub fn try_from_wire_name(name: &str) -> Option<Self> {
        let field = match name.trim().to_lowercase().as_str() {
            "category" => Self::Category,
            "location" => Self::Location,
            "ecotags" | "eco_tags" | "ecofeatures" => Self::EcoTags,
            "nomadfeatures" | "nomad_features" => Self::NomadFeatures,
            "minrating" | "min_rating" => Self::MinRating,
            "maxpricerange" | "max_price_range" | "maxprice" => Self::MaxPriceRange,
            _ => return None,
        };
        Some(field)
    }
}

/// A single user-supplied search constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: FilterField,
    pub value: String,
}

/// Ordered, transient collection of filter conditions.
///
/// Rebuilt for every search request, never persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterConditions(Vec<FilterCondition>);

impl FilterConditions {
    /// Append a condition if the field is known and the value
    /// is non-empty. Unknown fields are logged and dropped.
    pub fn add(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        let Some(field) = FilterField::try_from_wire_name(field) else {
            log::warn!("Dropping unknown filter field '{field}'");
            return;
        };
        self.0.push(FilterCondition { field, value });
    }

    /// Replace the condition at `index`. A patch that changes the
    /// field resets the value so that no stale value of the previous
    /// field survives. Out-of-range indices are ignored.
    pub fn update(&mut self, index: usize, field: FilterField, value: impl Into<String>) {
        let Some(condition) = self.0.get_mut(index) else {
            return;
        };
        let value = if condition.field == field {
            value.into()
        } else {
            String::new()
        };
        *condition = FilterCondition { field, value };
    }

    /// Delete by position; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.0.len() {
            self.0.remove(index);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[FilterCondition] {
        &self.0
    }

    /// Fold the conditions into a typed search request.
    ///
    /// Scalar fields are overwritten by later conditions (last one
    /// wins), tag fields accumulate. Unparseable numeric values are
    /// dropped, the query interprets everything defensively.
    pub fn into_search_request(self) -> SearchRequest {
        let mut request = SearchRequest::default();
        for FilterCondition { field, value } in self.0 {
            match field {
                FilterField::Category => match Category::from_str(value.trim()) {
                    Ok(category) => request.category = Some(category),
                    Err(_) => {
                        log::warn!("Dropping unknown category filter value '{value}'");
                    }
                },
                FilterField::Location => {
                    request.location = Some(value);
                }
                FilterField::EcoTags => {
                    request.eco_tags.push(value);
                }
                FilterField::NomadFeatures => {
                    request.nomad_features.push(value);
                }
                FilterField::MinRating => match value.trim().parse::<f64>() {
                    Ok(min_rating) if min_rating.is_finite() => {
                        request.min_rating = Some(AvgRatingValue::from(min_rating).clamp());
                    }
                    _ => {
                        log::warn!("Dropping unparseable minimum rating '{value}'");
                    }
                },
                FilterField::MaxPriceRange => match value.trim().parse::<u32>() {
                    Ok(max_price) => request.max_price_usd = Some(max_price),
                    Err(_) => {
                        log::warn!("Dropping unparseable price limit '{value}'");
                    }
                },
            }
        }
        request
    }
}

/// The typed representation of all user-supplied search
/// constraints of a single request.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchRequest {
    pub text: Option<String>,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub eco_tags: Vec<String>,
    pub nomad_features: Vec<String>,
    pub min_rating: Option<AvgRatingValue>,
    pub max_price_usd: Option<u32>,
    pub sort: SortOption,
}

impl From<SearchRequest> for ListingQuery {
    fn from(from: SearchRequest) -> Self {
        let SearchRequest {
            text,
            category,
            location,
            eco_tags,
            nomad_features,
            min_rating,
            max_price_usd,
            sort,
        } = from;
        // An empty or blank text is no constraint at all.
        let text = text
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        let location = location
            .map(|location| location.trim().to_owned())
            .filter(|location| !location.is_empty());
        Self {
            status: vec![ListingStatus::Active],
            text,
            category,
            location,
            eco_tags,
            nomad_features,
            min_rating,
            max_price_usd,
            sort,
        }
    }
}
