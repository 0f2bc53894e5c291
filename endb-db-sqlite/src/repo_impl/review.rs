use super::*;

impl<'a> ReviewRepo for DbReadOnly<'a> {
    fn create_review(&self, _review: &Review) -> Result<()> {
        unreachable!();
    }
    fn update_review(&self, _review: &Review) -> Result<()> {
        unreachable!();
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn approved_reviews_of_listing(&self, listing_id: &str) -> Result<Vec<Review>> {
        approved_reviews_of_listing(&mut self.conn.borrow_mut(), listing_id)
    }
    fn try_get_review_of_reviewer(
        &self,
        listing_id: &str,
        reviewer: &EmailAddress,
    ) -> Result<Option<Review>> {
        try_get_review_of_reviewer(&mut self.conn.borrow_mut(), listing_id, reviewer)
    }
    fn count_reviews_of_reviewer_since(
        &self,
        reviewer: &EmailAddress,
        since: TimestampMs,
    ) -> Result<u64> {
        count_reviews_of_reviewer_since(&mut self.conn.borrow_mut(), reviewer, since)
    }

    fn approved_review_stats(&self) -> Result<Vec<ReviewStats>> {
        approved_review_stats(&mut self.conn.borrow_mut())
    }

    fn try_get_vote(&self, review_id: &str, voter: &EmailAddress) -> Result<Option<ReviewVote>> {
        try_get_vote(&mut self.conn.borrow_mut(), review_id, voter)
    }
    fn create_vote(&self, _vote: &ReviewVote) -> Result<()> {
        unreachable!();
    }
    fn update_vote(&self, _vote: &ReviewVote) -> Result<()> {
        unreachable!();
    }
}

impl<'a> ReviewRepo for DbReadWrite<'a> {
    fn create_review(&self, review: &Review) -> Result<()> {
        create_review(&mut self.conn.borrow_mut(), review)
    }
    fn update_review(&self, review: &Review) -> Result<()> {
        update_review(&mut self.conn.borrow_mut(), review)
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn approved_reviews_of_listing(&self, listing_id: &str) -> Result<Vec<Review>> {
        approved_reviews_of_listing(&mut self.conn.borrow_mut(), listing_id)
    }
    fn try_get_review_of_reviewer(
        &self,
        listing_id: &str,
        reviewer: &EmailAddress,
    ) -> Result<Option<Review>> {
        try_get_review_of_reviewer(&mut self.conn.borrow_mut(), listing_id, reviewer)
    }
    fn count_reviews_of_reviewer_since(
        &self,
        reviewer: &EmailAddress,
        since: TimestampMs,
    ) -> Result<u64> {
        count_reviews_of_reviewer_since(&mut self.conn.borrow_mut(), reviewer, since)
    }

    fn approved_review_stats(&self) -> Result<Vec<ReviewStats>> {
        approved_review_stats(&mut self.conn.borrow_mut())
    }

    fn try_get_vote(&self, review_id: &str, voter: &EmailAddress) -> Result<Option<ReviewVote>> {
        try_get_vote(&mut self.conn.borrow_mut(), review_id, voter)
    }
    fn create_vote(&self, vote: &ReviewVote) -> Result<()> {
        create_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn update_vote(&self, vote: &ReviewVote) -> Result<()> {
        update_vote(&mut self.conn.borrow_mut(), vote)
    }
}

impl<'a> ReviewRepo for DbConnection<'a> {
    fn create_review(&self, review: &Review) -> Result<()> {
        create_review(&mut self.conn.borrow_mut(), review)
    }
    fn update_review(&self, review: &Review) -> Result<()> {
        update_review(&mut self.conn.borrow_mut(), review)
    }

    fn get_review(&self, id: &str) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn approved_reviews_of_listing(&self, listing_id: &str) -> Result<Vec<Review>> {
        approved_reviews_of_listing(&mut self.conn.borrow_mut(), listing_id)
    }
    fn try_get_review_of_reviewer(
        &self,
        listing_id: &str,
        reviewer: &EmailAddress,
    ) -> Result<Option<Review>> {
        try_get_review_of_reviewer(&mut self.conn.borrow_mut(), listing_id, reviewer)
    }
    fn count_reviews_of_reviewer_since(
        &self,
        reviewer: &EmailAddress,
        since: TimestampMs,
    ) -> Result<u64> {
        count_reviews_of_reviewer_since(&mut self.conn.borrow_mut(), reviewer, since)
    }

    fn approved_review_stats(&self) -> Result<Vec<ReviewStats>> {
        approved_review_stats(&mut self.conn.borrow_mut())
    }

    fn try_get_vote(&self, review_id: &str, voter: &EmailAddress) -> Result<Option<ReviewVote>> {
        try_get_vote(&mut self.conn.borrow_mut(), review_id, voter)
    }
    fn create_vote(&self, vote: &ReviewVote) -> Result<()> {
        create_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn update_vote(&self, vote: &ReviewVote) -> Result<()> {
        update_vote(&mut self.conn.borrow_mut(), vote)
    }
}

impl<'a> From<&'a Review> for models::NewReview<'a> {
    fn from(from: &'a Review) -> Self {
        let Review {
            id,
            listing_id,
            reviewer,
            created_at,
            rating,
            comment,
            status,
            helpful_count,
            unhelpful_count,
        } = from;
        Self {
            id: id.as_str(),
            listing_id: listing_id.as_str(),
            reviewer_email: reviewer.as_str(),
            created_at: created_at.into_milliseconds(),
            rating: i8::from(*rating) as i16,
            comment,
            status: (*status).into(),
            helpful_count: *helpful_count as i32,
            unhelpful_count: *unhelpful_count as i32,
        }
    }
}

fn load_review(entity: models::ReviewEntity) -> Result<Review> {
    let models::ReviewEntity {
        rowid: _,
        id,
        listing_id,
        reviewer_email,
        created_at,
        rating,
        comment,
        status,
        helpful_count,
        unhelpful_count,
    } = entity;
    let status = load_review_status(status)?;
    Ok(Review {
        id: id.into(),
        listing_id: listing_id.into(),
        reviewer: EmailAddress::new_unchecked(reviewer_email),
        created_at: TimestampMs::from_milliseconds(created_at),
        rating: RatingValue::new(rating as i8),
        comment,
        status,
        helpful_count: helpful_count as u32,
        unhelpful_count: unhelpful_count as u32,
    })
}

fn create_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    let new_review = models::NewReview::from(review);
    diesel::insert_into(schema::reviews::table)
        .values(&new_review)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_review(conn: &mut SqliteConnection, review: &Review) -> Result<()> {
    use schema::reviews::dsl;
    let new_review = models::NewReview::from(review);
    diesel::update(dsl::reviews.filter(dsl::id.eq(new_review.id)))
        .set(&new_review)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_review(conn: &mut SqliteConnection, id: &str) -> Result<Review> {
    use schema::reviews::dsl;
    let entity = dsl::reviews
        .filter(dsl::id.eq(id))
        .first::<models::ReviewEntity>(conn)
        .map_err(from_diesel_err)?;
    load_review(entity)
}

fn approved_reviews_of_listing(
    conn: &mut SqliteConnection,
    listing_id: &str,
) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    dsl::reviews
        .filter(dsl::listing_id.eq(listing_id))
        .filter(dsl::status.eq(i16::from(ReviewStatus::Approved)))
        .order_by(dsl::created_at.desc())
        .load::<models::ReviewEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_review)
        .collect()
}

fn try_get_review_of_reviewer(
    conn: &mut SqliteConnection,
    listing_id: &str,
    reviewer: &EmailAddress,
) -> Result<Option<Review>> {
    use schema::reviews::dsl;
    dsl::reviews
        .filter(dsl::listing_id.eq(listing_id))
        .filter(dsl::reviewer_email.eq(reviewer.as_str()))
        .first::<models::ReviewEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_review)
        .transpose()
}

fn count_reviews_of_reviewer_since(
    conn: &mut SqliteConnection,
    reviewer: &EmailAddress,
    since: TimestampMs,
) -> Result<u64> {
    use schema::reviews::dsl;
    let count = dsl::reviews
        .filter(dsl::reviewer_email.eq(reviewer.as_str()))
        .filter(dsl::created_at.ge(since.into_milliseconds()))
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count as u64)
}

pub fn approved_review_stats(conn: &mut SqliteConnection) -> Result<Vec<ReviewStats>> {
    use diesel::dsl::{count_star, sum};
    use schema::reviews::dsl;
    let rows: Vec<(String, Option<i64>, i64, Option<i64>)> = dsl::reviews
        .filter(dsl::status.eq(i16::from(ReviewStatus::Approved)))
        .group_by(dsl::listing_id)
        .select((
            dsl::listing_id,
            sum(dsl::rating),
            count_star(),
            sum(dsl::helpful_count),
        ))
        .load(conn)
        .map_err(from_diesel_err)?;
    Ok(rows
        .into_iter()
        .map(|(listing_id, rating_sum, review_count, helpful_total)| {
            // The sums are never NULL for a non-empty group.
            let rating_sum = rating_sum.unwrap_or(0);
            let helpful_total = helpful_total.unwrap_or(0);
            ReviewStats {
                listing_id: listing_id.into(),
                avg_rating: (rating_sum as f64 / review_count as f64).into(),
                review_count: review_count as u64,
                helpful_total: helpful_total as u64,
            }
        })
        .collect())
}

impl<'a> From<&'a ReviewVote> for models::ReviewVoteEntity {
    fn from(from: &'a ReviewVote) -> Self {
        let ReviewVote {
            review_id,
            voter,
            helpful,
            created_at,
        } = from;
        Self {
            review_id: review_id.to_string(),
            voter_email: voter.as_str().to_owned(),
            helpful: *helpful,
            created_at: created_at.into_milliseconds(),
        }
    }
}

fn load_vote(entity: models::ReviewVoteEntity) -> ReviewVote {
    let models::ReviewVoteEntity {
        review_id,
        voter_email,
        helpful,
        created_at,
    } = entity;
    ReviewVote {
        review_id: review_id.into(),
        voter: EmailAddress::new_unchecked(voter_email),
        helpful,
        created_at: TimestampMs::from_milliseconds(created_at),
    }
}

fn try_get_vote(
    conn: &mut SqliteConnection,
    review_id: &str,
    voter: &EmailAddress,
) -> Result<Option<ReviewVote>> {
    use schema::review_votes::dsl;
    Ok(dsl::review_votes
        .filter(dsl::review_id.eq(review_id))
        .filter(dsl::voter_email.eq(voter.as_str()))
        .first::<models::ReviewVoteEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_vote))
}

fn create_vote(conn: &mut SqliteConnection, vote: &ReviewVote) -> Result<()> {
    let new_vote = models::ReviewVoteEntity::from(vote);
    diesel::insert_into(schema::review_votes::table)
        .values(&new_vote)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_vote(conn: &mut SqliteConnection, vote: &ReviewVote) -> Result<()> {
    use schema::review_votes::dsl;
    let new_vote = models::ReviewVoteEntity::from(vote);
    diesel::update(
        dsl::review_votes
            .filter(dsl::review_id.eq(&new_vote.review_id))
            .filter(dsl::voter_email.eq(&new_vote.voter_email)),
    )
    .set(&new_vote)
    .execute(conn)
    .map_err(from_diesel_err)?;
    Ok(())
}
