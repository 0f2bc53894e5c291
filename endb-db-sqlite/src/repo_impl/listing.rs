use std::collections::HashMap;

use super::*;

impl<'a> ListingRepo for DbReadOnly<'a> {
    fn create_listing(&self, _listing: &Listing) -> Result<()> {
        unreachable!();
    }
    fn update_listing(&self, _listing: &Listing) -> Result<()> {
        unreachable!();
    }

    fn get_listing(&self, id: &str) -> Result<Listing> {
        get_listing(&mut self.conn.borrow_mut(), id)
    }
    fn get_listings(&self, ids: &[&str]) -> Result<Vec<Listing>> {
        get_listings(&mut self.conn.borrow_mut(), ids)
    }
    fn try_get_listing_by_slug(&self, slug: &str) -> Result<Option<Listing>> {
        try_get_listing_by_slug(&mut self.conn.borrow_mut(), slug)
    }

    fn query_listings(
        &self,
        query: &ListingQuery,
        pagination: &Pagination,
    ) -> Result<Vec<Listing>> {
        query_listings(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_listings(&self, query: &ListingQuery) -> Result<u64> {
        count_listings(&mut self.conn.borrow_mut(), query)
    }

    fn featured_listings(&self, limit: u64) -> Result<Vec<Listing>> {
        featured_listings(&mut self.conn.borrow_mut(), limit)
    }
}

impl<'a> ListingRepo for DbReadWrite<'a> {
    fn create_listing(&self, listing: &Listing) -> Result<()> {
        create_listing(&mut self.conn.borrow_mut(), listing)
    }
    fn update_listing(&self, listing: &Listing) -> Result<()> {
        update_listing(&mut self.conn.borrow_mut(), listing)
    }

    fn get_listing(&self, id: &str) -> Result<Listing> {
        get_listing(&mut self.conn.borrow_mut(), id)
    }
    fn get_listings(&self, ids: &[&str]) -> Result<Vec<Listing>> {
        get_listings(&mut self.conn.borrow_mut(), ids)
    }
    fn try_get_listing_by_slug(&self, slug: &str) -> Result<Option<Listing>> {
        try_get_listing_by_slug(&mut self.conn.borrow_mut(), slug)
    }

    fn query_listings(
        &self,
        query: &ListingQuery,
        pagination: &Pagination,
    ) -> Result<Vec<Listing>> {
        query_listings(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_listings(&self, query: &ListingQuery) -> Result<u64> {
        count_listings(&mut self.conn.borrow_mut(), query)
    }

    fn featured_listings(&self, limit: u64) -> Result<Vec<Listing>> {
        featured_listings(&mut self.conn.borrow_mut(), limit)
    }
}

impl<'a> ListingRepo for DbConnection<'a> {
    fn create_listing(&self, listing: &Listing) -> Result<()> {
        create_listing(&mut self.conn.borrow_mut(), listing)
    }
    fn update_listing(&self, listing: &Listing) -> Result<()> {
        update_listing(&mut self.conn.borrow_mut(), listing)
    }

    fn get_listing(&self, id: &str) -> Result<Listing> {
        get_listing(&mut self.conn.borrow_mut(), id)
    }
    fn get_listings(&self, ids: &[&str]) -> Result<Vec<Listing>> {
        get_listings(&mut self.conn.borrow_mut(), ids)
    }
    fn try_get_listing_by_slug(&self, slug: &str) -> Result<Option<Listing>> {
        try_get_listing_by_slug(&mut self.conn.borrow_mut(), slug)
    }

    fn query_listings(
        &self,
        query: &ListingQuery,
        pagination: &Pagination,
    ) -> Result<Vec<Listing>> {
        query_listings(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_listings(&self, query: &ListingQuery) -> Result<u64> {
        count_listings(&mut self.conn.borrow_mut(), query)
    }

    fn featured_listings(&self, limit: u64) -> Result<Vec<Listing>> {
        featured_listings(&mut self.conn.borrow_mut(), limit)
    }
}

impl<'a> From<&'a Listing> for models::NewListing<'a> {
    fn from(from: &'a Listing) -> Self {
        let Listing {
            id,
            slug,
            title,
            description,
            category,
            city,
            address,
            geo,
            price_usd,
            eco_tags: _,
            nomad_features: _,
            eco_scores,
            status,
            featured,
            owner,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.as_str(),
            slug,
            title,
            description,
            category: category.to_string(),
            city,
            address: address.as_deref(),
            lat: geo.map(|g| g.lat()),
            lng: geo.map(|g| g.lng()),
            price_usd: price_usd.map(|p| p as i32),
            eco_energy_efficiency: eco_scores.energy_efficiency,
            eco_water_conservation: eco_scores.water_conservation,
            eco_waste_reduction: eco_scores.waste_reduction,
            eco_sustainable_materials: eco_scores.sustainable_materials,
            eco_community_impact: eco_scores.community_impact,
            status: (*status).into(),
            featured: *featured,
            owner_email: owner.as_str(),
            created_at: created_at.into_milliseconds(),
            updated_at: updated_at.map(TimestampMs::into_milliseconds),
        }
    }
}

fn load_listing(
    entity: models::ListingEntity,
    eco_tags: Vec<String>,
    nomad_features: Vec<String>,
) -> Result<Listing> {
    let models::ListingEntity {
        rowid: _,
        id,
        slug,
        title,
        description,
        category,
        city,
        address,
        lat,
        lng,
        price_usd,
        eco_energy_efficiency,
        eco_water_conservation,
        eco_waste_reduction,
        eco_sustainable_materials,
        eco_community_impact,
        status,
        featured,
        owner_email,
        created_at,
        updated_at,
    } = entity;
    let category = category
        .parse::<Category>()
        .map_err(|_| repo::Error::Other(anyhow!("Invalid category: {category}")))?;
    let status = load_listing_status(status)?;
    let geo = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(
            GeoPoint::try_new(lat, lng).map_err(|err| repo::Error::Other(err.into()))?,
        ),
        _ => None,
    };
    Ok(Listing {
        id: id.into(),
        slug,
        title,
        description,
        category,
        city,
        address,
        geo,
        price_usd: price_usd.map(|p| p as u32),
        eco_tags,
        nomad_features,
        eco_scores: EcoScores {
            energy_efficiency: eco_energy_efficiency,
            water_conservation: eco_water_conservation,
            waste_reduction: eco_waste_reduction,
            sustainable_materials: eco_sustainable_materials,
            community_impact: eco_community_impact,
        },
        status,
        featured,
        owner: EmailAddress::new_unchecked(owner_email),
        created_at: TimestampMs::from_milliseconds(created_at),
        updated_at: updated_at.map(TimestampMs::from_milliseconds),
    })
}

fn resolve_rowid(conn: &mut SqliteConnection, id: &str) -> Result<i64> {
    use schema::listings::dsl;
    dsl::listings
        .select(dsl::rowid)
        .filter(dsl::id.eq(id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)
}

fn insert_tags(
    conn: &mut SqliteConnection,
    parent_rowid: i64,
    eco_tags: &[String],
    nomad_features: &[String],
) -> Result<()> {
    let tags: Vec<_> = eco_tags
        .iter()
        .map(|label| (label, models::TAG_KIND_ECO))
        .chain(
            nomad_features
                .iter()
                .map(|label| (label, models::TAG_KIND_NOMAD)),
        )
        .map(|(label, kind)| models::NewListingTag {
            parent_rowid,
            label,
            kind,
        })
        .collect();
    diesel::insert_into(schema::listing_tag::table)
        .values(&tags)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_tags(conn: &mut SqliteConnection, parent_rowid: i64) -> Result<()> {
    use schema::listing_tag::dsl;
    diesel::delete(dsl::listing_tag.filter(dsl::parent_rowid.eq(parent_rowid)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

type TagsByRowid = HashMap<i64, (Vec<String>, Vec<String>)>;

fn load_tags(conn: &mut SqliteConnection, rowids: &[i64]) -> Result<TagsByRowid> {
    use schema::listing_tag::dsl;
    let mut by_rowid = TagsByRowid::new();
    let tags = dsl::listing_tag
        .filter(dsl::parent_rowid.eq_any(rowids.iter().copied()))
        .load::<models::ListingTag>(conn)
        .map_err(from_diesel_err)?;
    for tag in tags {
        let (eco_tags, nomad_features) = by_rowid.entry(tag.parent_rowid).or_default();
        if tag.kind == models::TAG_KIND_NOMAD {
            nomad_features.push(tag.label);
        } else {
            eco_tags.push(tag.label);
        }
    }
    Ok(by_rowid)
}

fn load_listings(
    conn: &mut SqliteConnection,
    entities: Vec<models::ListingEntity>,
) -> Result<Vec<Listing>> {
    let rowids: Vec<i64> = entities.iter().map(|entity| entity.rowid).collect();
    let mut tags = load_tags(conn, &rowids)?;
    entities
        .into_iter()
        .map(|entity| {
            let (eco_tags, nomad_features) = tags.remove(&entity.rowid).unwrap_or_default();
            load_listing(entity, eco_tags, nomad_features)
        })
        .collect()
}

fn create_listing(conn: &mut SqliteConnection, listing: &Listing) -> Result<()> {
    let new_listing = models::NewListing::from(listing);
    diesel::insert_into(schema::listings::table)
        .values(&new_listing)
        .execute(conn)
        .map_err(from_diesel_err)?;
    let rowid = resolve_rowid(conn, listing.id.as_str())?;
    insert_tags(conn, rowid, &listing.eco_tags, &listing.nomad_features)
}

fn update_listing(conn: &mut SqliteConnection, listing: &Listing) -> Result<()> {
    use schema::listings::dsl;
    let rowid = resolve_rowid(conn, listing.id.as_str())?;
    let new_listing = models::NewListing::from(listing);
    diesel::update(dsl::listings.filter(dsl::rowid.eq(rowid)))
        .set(&new_listing)
        .execute(conn)
        .map_err(from_diesel_err)?;
    delete_tags(conn, rowid)?;
    insert_tags(conn, rowid, &listing.eco_tags, &listing.nomad_features)
}

fn get_listing(conn: &mut SqliteConnection, id: &str) -> Result<Listing> {
    use schema::listings::dsl;
    let entity = dsl::listings
        .filter(dsl::id.eq(id))
        .first::<models::ListingEntity>(conn)
        .map_err(from_diesel_err)?;
    let rowid = entity.rowid;
    let mut tags = load_tags(conn, &[rowid])?;
    let (eco_tags, nomad_features) = tags.remove(&rowid).unwrap_or_default();
    load_listing(entity, eco_tags, nomad_features)
}

fn get_listings(conn: &mut SqliteConnection, ids: &[&str]) -> Result<Vec<Listing>> {
    use schema::listings::dsl;
    let entities = dsl::listings
        .filter(dsl::id.eq_any(ids.iter().copied()))
        .load::<models::ListingEntity>(conn)
        .map_err(from_diesel_err)?;
    load_listings(conn, entities)
}

fn try_get_listing_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<Option<Listing>> {
    use schema::listings::dsl;
    // A reused slug may also appear on soft-deleted rows. The
    // listing that still exists wins the lookup.
    let entity = dsl::listings
        .filter(dsl::slug.eq(slug))
        .order_by(dsl::status.desc())
        .first::<models::ListingEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?;
    let Some(entity) = entity else {
        return Ok(None);
    };
    let rowid = entity.rowid;
    let mut tags = load_tags(conn, &[rowid])?;
    let (eco_tags, nomad_features) = tags.remove(&rowid).unwrap_or_default();
    load_listing(entity, eco_tags, nomad_features).map(Some)
}

type BoxedListingQuery<'a> =
    schema::listings::BoxedQuery<'a, diesel::sqlite::Sqlite>;

/// Translate the store-level query into a boxed SQL query.
///
/// The minimum rating criterion is NOT part of the result because
/// it depends on the aggregated review data, see
/// [`query_listings_with_stats`].
fn filtered_listings(query: &ListingQuery) -> BoxedListingQuery<'_> {
    use schema::{listing_tag, listings::dsl};
    let mut listings = schema::listings::table.into_boxed();
    let status: Vec<i16> = query.status.iter().copied().map(i16::from).collect();
    listings = listings.filter(dsl::status.eq_any(status));
    if let Some(text) = &query.text {
        // SQLite LIKE is case-insensitive for ASCII characters.
        let pattern = format!("%{text}%");
        listings = listings.filter(
            dsl::title
                .like(pattern.clone())
                .or(dsl::description.like(pattern)),
        );
    }
    if let Some(category) = &query.category {
        listings = listings.filter(dsl::category.eq(category.to_string()));
    }
    if let Some(location) = &query.location {
        let pattern = format!("%{location}%");
        listings = listings.filter(
            dsl::city
                .like(pattern.clone())
                .nullable()
                .or(dsl::address.like(pattern)),
        );
    }
    // All requested tags have to be present (conjunction).
    for (labels, kind) in [
        (&query.eco_tags, models::TAG_KIND_ECO),
        (&query.nomad_features, models::TAG_KIND_NOMAD),
    ] {
        for label in labels {
            listings = listings.filter(diesel::dsl::exists(
                listing_tag::table
                    .filter(listing_tag::dsl::parent_rowid.eq(dsl::rowid))
                    .filter(listing_tag::dsl::label.eq(label.clone()))
                    .filter(listing_tag::dsl::kind.eq(kind)),
            ));
        }
    }
    if let Some(max_price) = query.max_price_usd {
        // Listings without a price are excluded by the SQL NULL
        // semantics of the comparison.
        listings = listings.filter(dsl::price_usd.le(max_price as i32));
    }
    listings
}

fn query_listings(
    conn: &mut SqliteConnection,
    query: &ListingQuery,
    pagination: &Pagination,
) -> Result<Vec<Listing>> {
    use schema::listings::dsl;
    if query.needs_review_stats() {
        return query_listings_with_stats(conn, query, pagination);
    }
    let mut listings = filtered_listings(query).order_by(dsl::created_at.desc());
    if let Some(limit) = pagination.limit {
        listings = listings.limit(limit as i64);
    }
    if let Some(offset) = pagination.offset {
        listings = listings.offset(offset as i64);
    }
    let entities = listings
        .load::<models::ListingEntity>(conn)
        .map_err(from_diesel_err)?;
    load_listings(conn, entities)
}

/// Two-phase query for all criteria that depend on the aggregated
/// review data.
///
/// Phase 1 collects the ids of all listings that match the plain
/// criteria together with the per-listing review aggregates. The
/// minimum rating criterion, the ordering, and the pagination are
/// applied to this in-memory candidate list. Phase 2 then only
/// loads the listings of the requested page.
fn query_listings_with_stats(
    conn: &mut SqliteConnection,
    query: &ListingQuery,
    pagination: &Pagination,
) -> Result<Vec<Listing>> {
    use schema::listings::dsl;
    let candidates: Vec<(String, i64)> = filtered_listings(query)
        .select((dsl::id, dsl::created_at))
        .load(conn)
        .map_err(from_diesel_err)?;
    let stats = super::review::approved_review_stats(conn)?;
    let stats: HashMap<&str, &ReviewStats> = stats
        .iter()
        .map(|s| (s.listing_id.as_str(), s))
        .collect();
    let mut candidates: Vec<(String, i64)> = candidates
        .into_iter()
        .filter(|(id, _)| {
            let Some(min_rating) = query.min_rating else {
                return true;
            };
            // Listings without any approved review have an undefined
            // average rating and never satisfy a minimum rating.
            stats
                .get(id.as_str())
                .map_or(false, |s| s.avg_rating >= min_rating)
        })
        .collect();
    match query.sort {
        SortOption::Rating => {
            candidates.sort_by(|(id_a, created_a), (id_b, created_b)| {
                let avg = |id: &str| {
                    stats
                        .get(id)
                        .map(|s| f64::from(s.avg_rating))
                        .unwrap_or(f64::NEG_INFINITY)
                };
                avg(id_b)
                    .partial_cmp(&avg(id_a))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(created_b.cmp(created_a))
            });
        }
        SortOption::Helpful => {
            candidates.sort_by(|(id_a, created_a), (id_b, created_b)| {
                let helpful =
                    |id: &str| stats.get(id).map(|s| s.helpful_total).unwrap_or(0);
                helpful(id_b)
                    .cmp(&helpful(id_a))
                    .then(created_b.cmp(created_a))
            });
        }
        SortOption::CreatedAt => {
            candidates.sort_by(|(_, created_a), (_, created_b)| created_b.cmp(created_a));
        }
    }
    let offset = pagination.offset.unwrap_or(0) as usize;
    let limit = pagination
        .limit
        .map(|limit| limit as usize)
        .unwrap_or(usize::MAX);
    let page_ids: Vec<String> = candidates
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|(id, _)| id)
        .collect();
    let id_refs: Vec<&str> = page_ids.iter().map(String::as_str).collect();
    let mut listings = get_listings(conn, &id_refs)?;
    let index: HashMap<&str, usize> = page_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    listings.sort_by_key(|listing| {
        index
            .get(listing.id.as_str())
            .copied()
            .unwrap_or(usize::MAX)
    });
    Ok(listings)
}

fn count_listings(conn: &mut SqliteConnection, query: &ListingQuery) -> Result<u64> {
    use schema::listings::dsl;
    if query.min_rating.is_none() {
        let count = filtered_listings(query)
            .count()
            .get_result::<i64>(conn)
            .map_err(from_diesel_err)?;
        return Ok(count as u64);
    }
    let candidates: Vec<String> = filtered_listings(query)
        .select(dsl::id)
        .load(conn)
        .map_err(from_diesel_err)?;
    let stats = super::review::approved_review_stats(conn)?;
    let stats: HashMap<&str, &ReviewStats> = stats
        .iter()
        .map(|s| (s.listing_id.as_str(), s))
        .collect();
    let min_rating = query.min_rating.unwrap();
    let count = candidates
        .iter()
        .filter(|id| {
            stats
                .get(id.as_str())
                .map_or(false, |s| s.avg_rating >= min_rating)
        })
        .count();
    Ok(count as u64)
}

fn featured_listings(conn: &mut SqliteConnection, limit: u64) -> Result<Vec<Listing>> {
    use schema::listings::dsl;
    let entities = dsl::listings
        .filter(dsl::featured.eq(true))
        .filter(dsl::status.eq(i16::from(ListingStatus::Active)))
        .order_by(dsl::created_at.desc())
        .limit(limit as i64)
        .load::<models::ListingEntity>(conn)
        .map_err(from_diesel_err)?;
    load_listings(conn, entities)
}
