use super::*;

use endb_core::{
    db::ListingQuery,
    filter::{FilterConditions, SearchRequest},
};
use rocket::FromForm;

/// Query string of `GET /search`.
///
/// Both the camelCase wire names and their snake_case
/// equivalents are accepted. Query strings are parsed
/// leniently, a malformed number is treated as absent.
#[derive(Debug, Clone, Default, FromForm)]
pub struct SearchQuery {
    #[field(name = "query")]
    #[field(name = "q")]
    query: Option<String>,
    category: Option<String>,
    location: Option<String>,
    #[field(name = "ecoTags")]
    #[field(name = "eco_tags")]
    #[field(name = "ecoFeatures")]
    eco_tags: Option<String>,
    #[field(name = "nomadFeatures")]
    #[field(name = "nomad_features")]
    nomad_features: Option<String>,
    #[field(name = "minRating")]
    #[field(name = "min_rating")]
    min_rating: Option<String>,
    #[field(name = "maxPrice")]
    #[field(name = "max_price")]
    max_price: Option<String>,
    page: Option<u64>,
    limit: Option<u64>,
    sort: Option<String>,
}

impl SearchQuery {
    fn into_search_request(self) -> (SearchRequest, Option<u64>, Option<u64>) {
        let Self {
            query,
            category,
            location,
            eco_tags,
            nomad_features,
            min_rating,
            max_price,
            page,
            limit,
            sort,
        } = self;
        let mut conditions = FilterConditions::default();
        if let Some(category) = category {
            conditions.add("category", category);
        }
        if let Some(location) = location {
            conditions.add("location", location);
        }
        for tag in eco_tags.iter().flat_map(|tags| tags.split(',')) {
            conditions.add("ecoTags", tag.trim());
        }
        for feature in nomad_features.iter().flat_map(|features| features.split(',')) {
            conditions.add("nomadFeatures", feature.trim());
        }
        if let Some(min_rating) = min_rating {
            conditions.add("minRating", min_rating);
        }
        if let Some(max_price) = max_price {
            conditions.add("maxPrice", max_price);
        }
        let mut request = conditions.into_search_request();
        request.text = query;
        request.sort = endb_core::db::SortOption::from_wire_name(sort.as_deref().unwrap_or(""));
        (request, page, limit)
    }
}

#[get("/search?<search..>")]
pub async fn get_search(
    db: sqlite::Connections,
    search: SearchQuery,
) -> Result<json::SearchResponse> {
    let (request, page, limit) = search.into_search_request();
    let response = search_response(db, request, page, limit).await?;
    Ok(Json(response))
}

#[post("/search", format = "application/json", data = "<search>")]
pub async fn post_search(
    db: sqlite::Connections,
    search: JsonResult<'_, json::SearchRequest>,
) -> Result<json::SearchResponse> {
    let json::SearchRequest {
        query,
        filters,
        page,
        limit,
        sort,
    } = search.map_err(ApiError::from)?.into_inner();
    let mut conditions = FilterConditions::default();
    for condition in filters.into_iter().flatten() {
        conditions.add(&condition.field, condition.value.into_string());
    }
    let mut request = conditions.into_search_request();
    request.text = query;
    request.sort = endb_core::db::SortOption::from_wire_name(sort.as_deref().unwrap_or(""));
    let page = page.and_then(|page| page.as_u64());
    let limit = limit.and_then(|limit| limit.as_u64());
    let response = search_response(db, request, page, limit).await?;
    Ok(Json(response))
}

/// Runs the paginated query and the total count on two blocking
/// tasks, each with its own shared read connection.
async fn search_response(
    db: sqlite::Connections,
    request: SearchRequest,
    page: Option<u64>,
    limit: Option<u64>,
) -> result::Result<json::SearchResponse, ApiError> {
    let page = usecases::clamp_page(page);
    let limit = usecases::clamp_limit(limit);
    let pagination = usecases::page_to_pagination(page, limit);

    let filters = applied_filters(&request);
    let query = ListingQuery::from(request);

    let count_query = query.clone();
    let count_db = db.clone();
    let listings_task = rocket::tokio::task::spawn_blocking(move || {
        let db = db.shared()?;
        let listings = usecases::search_listings(&db, &query, &pagination)?;
        Ok::<_, ApiError>(listings)
    });
    let count_task = rocket::tokio::task::spawn_blocking(move || {
        let db = count_db.shared()?;
        let total = usecases::count_listings(&db, &count_query)?;
        Ok::<_, ApiError>(total)
    });
    let (listings, total) = rocket::tokio::try_join!(listings_task, count_task)
        .map_err(|err| ApiError::Other(err.into()))?;
    let (listings, total) = (listings?, total?);

    Ok(json::SearchResponse {
        listings: listings.into_iter().map(Into::into).collect(),
        pagination: json::Pagination::new(page, limit, total),
        filters,
    })
}

fn applied_filters(request: &SearchRequest) -> json::AppliedFilters {
    json::AppliedFilters {
        query: request.text.clone(),
        category: request.category.map(|category| category.to_string()),
        location: request.location.clone(),
        eco_tags: request.eco_tags.clone(),
        nomad_features: request.nomad_features.clone(),
        min_rating: request.min_rating.map(f64::from),
        max_price_usd: request.max_price_usd,
        sort: request.sort.wire_name().to_owned(),
    }
}
