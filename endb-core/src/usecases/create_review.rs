use lazy_static::lazy_static;
use regex::Regex;
use time::Duration;

use super::prelude::*;

pub const MIN_COMMENT_LEN: usize = 10;
pub const MAX_COMMENT_LEN: usize = 2000;

/// Reviews with a spam score below this threshold are
/// approved without moderation.
pub const SPAM_AUTO_APPROVE_THRESHOLD: f64 = 0.3;

/// More reviews than this per reviewer and hour are rejected.
pub const MAX_REVIEWS_PER_HOUR: u64 = 3;

const SPAM_KEYWORDS: &[&str] = &[
    "casino",
    "viagra",
    "loan",
    "investment",
    "crypto",
    "bitcoin",
    "click here",
    "buy now",
];

lazy_static! {
    static ref PUNCT_RUNS: Regex = Regex::new(r"[!?]{2,}").expect("punctuation run pattern");
}

fn has_repeated_char_run(text: &str, min_run: usize) -> bool {
    let mut run = 0;
    let mut previous = None;
    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
            if run >= min_run {
                return true;
            }
        } else {
            previous = Some(c);
            run = 1;
        }
    }
    false
}

/// Heuristic spam score of a review comment in `[0.0, 1.0]`.
///
/// Keyword hits, shouting, excessive punctuation and repeated
/// characters each add a penalty, capped at `1.0`.
pub fn spam_score(comment: &str) -> f64 {
    let mut score: f64 = 0.0;
    let lowered = comment.to_lowercase();
    for keyword in SPAM_KEYWORDS {
        if lowered.contains(keyword) {
            score += 0.3;
        }
    }
    let char_count = comment.chars().count();
    if char_count > 0 {
        let caps = comment.chars().filter(char::is_ascii_uppercase).count();
        if caps as f64 / char_count as f64 > 0.5 {
            score += 0.2;
        }
    }
    if PUNCT_RUNS.find_iter(comment).count() > 2 {
        score += 0.2;
    }
    if has_repeated_char_run(comment, 5) {
        score += 0.2;
    }
    score.min(1.0)
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub listing: String,
    pub rating: i8,
    pub comment: String,
}

pub fn create_review<R>(repo: &R, reviewer: &User, new_review: NewReview) -> Result<Review>
where
    R: ListingRepo + ReviewRepo,
{
    let NewReview {
        listing,
        rating,
        comment,
    } = new_review;
    let rating = RatingValue::from(rating);
    if !rating.is_valid() {
        return Err(Error::RatingValue);
    }
    let comment = comment.trim().to_owned();
    if !(MIN_COMMENT_LEN..=MAX_COMMENT_LEN).contains(&comment.chars().count()) {
        return Err(Error::Comment);
    }
    let listing = super::get_listing(repo, &listing)?;
    if !listing.is_active() {
        return Err(Error::Repo(crate::repositories::Error::NotFound));
    }
    if repo
        .try_get_review_of_reviewer(listing.id.as_str(), &reviewer.email)?
        .is_some()
    {
        return Err(Error::ReviewExists);
    }
    let now = TimestampMs::now();
    let recent = repo.count_reviews_of_reviewer_since(&reviewer.email, now - Duration::hours(1))?;
    if recent >= MAX_REVIEWS_PER_HOUR {
        log::warn!(
            "Review rate limit reached for {reviewer}",
            reviewer = reviewer.email
        );
        return Err(Error::RateLimit);
    }
    let score = spam_score(&comment);
    let status = if score < SPAM_AUTO_APPROVE_THRESHOLD {
        ReviewStatus::Approved
    } else {
        log::info!(
            "Review for listing {listing} held for moderation (spam score {score:.2})",
            listing = listing.id
        );
        ReviewStatus::Pending
    };
    let review = Review {
        id: Id::new(),
        listing_id: listing.id,
        reviewer: reviewer.email.clone(),
        created_at: now,
        rating,
        comment,
        status,
        helpful_count: 0,
        unhelpful_count: 0,
    };
    repo.create_review(&review)?;
    Ok(review)
}
