///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (email) {
        email -> Text,
        email_confirmed -> Bool,
        password -> Text,
        role -> SmallInt,
        plan -> SmallInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Listings
///////////////////////////////////////////////////////////////////////

table! {
    listings (rowid) {
        rowid -> BigInt,
        id -> Text,
        slug -> Text,
        title -> Text,
        description -> Text,
        category -> Text,
        city -> Text,
        address -> Nullable<Text>,
        lat -> Nullable<Double>,
        lng -> Nullable<Double>,
        price_usd -> Nullable<Integer>,
        eco_energy_efficiency -> Nullable<Double>,
        eco_water_conservation -> Nullable<Double>,
        eco_waste_reduction -> Nullable<Double>,
        eco_sustainable_materials -> Nullable<Double>,
        eco_community_impact -> Nullable<Double>,
        status -> SmallInt,
        featured -> Bool,
        owner_email -> Text,
        created_at -> BigInt,
        updated_at -> Nullable<BigInt>,
    }
}

table! {
    listing_tag (parent_rowid, label, kind) {
        parent_rowid -> BigInt,
        label -> Text,
        // 0 = eco tag, 1 = nomad feature
        kind -> SmallInt,
    }
}

joinable!(listing_tag -> listings (parent_rowid));
allow_tables_to_appear_in_same_query!(listings, listing_tag);

///////////////////////////////////////////////////////////////////////
// Reviews
///////////////////////////////////////////////////////////////////////

table! {
    reviews (rowid) {
        rowid -> BigInt,
        id -> Text,
        listing_id -> Text,
        reviewer_email -> Text,
        created_at -> BigInt,
        rating -> SmallInt,
        comment -> Text,
        status -> SmallInt,
        helpful_count -> Integer,
        unhelpful_count -> Integer,
    }
}

table! {
    review_votes (review_id, voter_email) {
        review_id -> Text,
        voter_email -> Text,
        helpful -> Bool,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Favorites
///////////////////////////////////////////////////////////////////////

table! {
    favorites (user_email, listing_id) {
        user_email -> Text,
        listing_id -> Text,
        created_at -> BigInt,
    }
}
