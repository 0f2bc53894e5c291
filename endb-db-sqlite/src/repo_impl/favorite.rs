use super::*;

impl<'a> FavoriteRepo for DbReadOnly<'a> {
    fn create_favorite(&self, _favorite: &Favorite) -> Result<()> {
        unreachable!();
    }
    fn delete_favorite(&self, _user: &EmailAddress, _listing_id: &str) -> Result<()> {
        unreachable!();
    }

    fn try_get_favorite(
        &self,
        user: &EmailAddress,
        listing_id: &str,
    ) -> Result<Option<Favorite>> {
        try_get_favorite(&mut self.conn.borrow_mut(), user, listing_id)
    }
    fn favorites_of_user(&self, user: &EmailAddress) -> Result<Vec<Favorite>> {
        favorites_of_user(&mut self.conn.borrow_mut(), user)
    }
}

impl<'a> FavoriteRepo for DbReadWrite<'a> {
    fn create_favorite(&self, favorite: &Favorite) -> Result<()> {
        create_favorite(&mut self.conn.borrow_mut(), favorite)
    }
    fn delete_favorite(&self, user: &EmailAddress, listing_id: &str) -> Result<()> {
        delete_favorite(&mut self.conn.borrow_mut(), user, listing_id)
    }

    fn try_get_favorite(
        &self,
        user: &EmailAddress,
        listing_id: &str,
    ) -> Result<Option<Favorite>> {
        try_get_favorite(&mut self.conn.borrow_mut(), user, listing_id)
    }
    fn favorites_of_user(&self, user: &EmailAddress) -> Result<Vec<Favorite>> {
        favorites_of_user(&mut self.conn.borrow_mut(), user)
    }
}

impl<'a> FavoriteRepo for DbConnection<'a> {
    fn create_favorite(&self, favorite: &Favorite) -> Result<()> {
        create_favorite(&mut self.conn.borrow_mut(), favorite)
    }
    fn delete_favorite(&self, user: &EmailAddress, listing_id: &str) -> Result<()> {
        delete_favorite(&mut self.conn.borrow_mut(), user, listing_id)
    }

    fn try_get_favorite(
        &self,
        user: &EmailAddress,
        listing_id: &str,
    ) -> Result<Option<Favorite>> {
        try_get_favorite(&mut self.conn.borrow_mut(), user, listing_id)
    }
    fn favorites_of_user(&self, user: &EmailAddress) -> Result<Vec<Favorite>> {
        favorites_of_user(&mut self.conn.borrow_mut(), user)
    }
}

impl<'a> From<&'a Favorite> for models::FavoriteEntity {
    fn from(from: &'a Favorite) -> Self {
        let Favorite {
            user,
            listing_id,
            created_at,
        } = from;
        Self {
            user_email: user.as_str().to_owned(),
            listing_id: listing_id.to_string(),
            created_at: created_at.into_milliseconds(),
        }
    }
}

fn load_favorite(entity: models::FavoriteEntity) -> Favorite {
    let models::FavoriteEntity {
        user_email,
        listing_id,
        created_at,
    } = entity;
    Favorite {
        user: EmailAddress::new_unchecked(user_email),
        listing_id: listing_id.into(),
        created_at: TimestampMs::from_milliseconds(created_at),
    }
}

fn create_favorite(conn: &mut SqliteConnection, favorite: &Favorite) -> Result<()> {
    let new_favorite = models::FavoriteEntity::from(favorite);
    diesel::insert_into(schema::favorites::table)
        .values(&new_favorite)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_favorite(
    conn: &mut SqliteConnection,
    user: &EmailAddress,
    listing_id: &str,
) -> Result<()> {
    use schema::favorites::dsl;
    let deleted = diesel::delete(
        dsl::favorites
            .filter(dsl::user_email.eq(user.as_str()))
            .filter(dsl::listing_id.eq(listing_id)),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    if deleted == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn try_get_favorite(
    conn: &mut SqliteConnection,
    user: &EmailAddress,
    listing_id: &str,
) -> Result<Option<Favorite>> {
    use schema::favorites::dsl;
    Ok(dsl::favorites
        .filter(dsl::user_email.eq(user.as_str()))
        .filter(dsl::listing_id.eq(listing_id))
        .first::<models::FavoriteEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_favorite))
}

fn favorites_of_user(conn: &mut SqliteConnection, user: &EmailAddress) -> Result<Vec<Favorite>> {
    use schema::favorites::dsl;
    Ok(dsl::favorites
        .filter(dsl::user_email.eq(user.as_str()))
        .order_by(dsl::created_at.desc())
        .load::<models::FavoriteEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_favorite)
        .collect())
}
