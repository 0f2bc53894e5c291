use super::prelude::*;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 50;

/// Clamp a requested page number to `1..`.
///
/// Malformed or missing values never fail, they fall back
/// to the first page.
pub fn clamp_page(page: Option<u64>) -> u64 {
    match page {
        Some(page) if page >= 1 => page,
        Some(page) => {
            log::info!("Requested page {page} is out of range - using first page");
            1
        }
        None => 1,
    }
}

/// Clamp a requested page size to `1..=MAX_PAGE_SIZE` to
/// bound the response size.
pub fn clamp_limit(limit: Option<u64>) -> u64 {
    match limit {
        Some(limit) if limit > MAX_PAGE_SIZE => {
            log::info!(
                "Requested limit {limit} exceeds maximum limit {MAX_PAGE_SIZE} for search results"
            );
            MAX_PAGE_SIZE
        }
        Some(limit) if limit < 1 => {
            log::warn!("Invalid search limit {limit} - using default");
            DEFAULT_PAGE_SIZE
        }
        Some(limit) => limit,
        None => DEFAULT_PAGE_SIZE,
    }
}

/// Store pagination for a clamped page/limit pair.
pub fn page_to_pagination(page: u64, limit: u64) -> Pagination {
    debug_assert!(page >= 1);
    debug_assert!((1..=MAX_PAGE_SIZE).contains(&limit));
    Pagination {
        offset: Some((page - 1) * limit),
        limit: Some(limit),
    }
}

pub fn search_listings<R: ListingRepo>(
    repo: &R,
    query: &ListingQuery,
    pagination: &Pagination,
) -> Result<Vec<Listing>> {
    Ok(repo.query_listings(query, pagination)?)
}

pub fn count_listings<R: ListingRepo>(repo: &R, query: &ListingQuery) -> Result<u64> {
    Ok(repo.count_listings(query)?)
}
