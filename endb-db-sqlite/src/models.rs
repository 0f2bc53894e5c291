// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

pub const TAG_KIND_ECO: i16 = 0;
pub const TAG_KIND_NOMAD: i16 = 1;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = listings)]
pub struct NewListing<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub category: String,
    pub city: &'a str,
    pub address: Option<&'a str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub price_usd: Option<i32>,
    pub eco_energy_efficiency: Option<f64>,
    pub eco_water_conservation: Option<f64>,
    pub eco_waste_reduction: Option<f64>,
    pub eco_sustainable_materials: Option<f64>,
    pub eco_community_impact: Option<f64>,
    pub status: i16,
    pub featured: bool,
    pub owner_email: &'a str,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

#[derive(Queryable)]
pub struct ListingEntity {
    pub rowid: i64,
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub city: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub price_usd: Option<i32>,
    pub eco_energy_efficiency: Option<f64>,
    pub eco_water_conservation: Option<f64>,
    pub eco_waste_reduction: Option<f64>,
    pub eco_sustainable_materials: Option<f64>,
    pub eco_community_impact: Option<f64>,
    pub status: i16,
    pub featured: bool,
    pub owner_email: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

#[derive(Insertable)]
#[diesel(table_name = listing_tag)]
pub struct NewListingTag<'a> {
    pub parent_rowid: i64,
    pub label: &'a str,
    pub kind: i16,
}

#[derive(Queryable)]
pub struct ListingTag {
    pub parent_rowid: i64,
    pub label: String,
    pub kind: i16,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = reviews)]
pub struct NewReview<'a> {
    pub id: &'a str,
    pub listing_id: &'a str,
    pub reviewer_email: &'a str,
    pub created_at: i64,
    pub rating: i16,
    pub comment: &'a str,
    pub status: i16,
    pub helpful_count: i32,
    pub unhelpful_count: i32,
}

#[derive(Queryable)]
pub struct ReviewEntity {
    pub rowid: i64,
    pub id: String,
    pub listing_id: String,
    pub reviewer_email: String,
    pub created_at: i64,
    pub rating: i16,
    pub comment: String,
    pub status: i16,
    pub helpful_count: i32,
    pub unhelpful_count: i32,
}

#[derive(Insertable, AsChangeset, Queryable)]
#[diesel(table_name = review_votes)]
pub struct ReviewVoteEntity {
    pub review_id: String,
    pub voter_email: String,
    pub helpful: bool,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub email_confirmed: bool,
    pub password: &'a str,
    pub role: i16,
    pub plan: i16,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub email: String,
    pub email_confirmed: bool,
    pub password: String,
    pub role: i16,
    pub plan: i16,
}

#[derive(Insertable, Queryable)]
#[diesel(table_name = favorites)]
pub struct FavoriteEntity {
    pub user_email: String,
    pub listing_id: String,
    pub created_at: i64,
}
