use super::prelude::*;
use crate::{
    local_state::{CachedReview, KeyValueStore, LocalState},
    rating::{apply_review_summary, summarize_reviews, Rated},
    util::{
        text::{sanitize_input, DEFAULT_MAX_INPUT_LEN},
        validate::{ReviewInvalidation, Validate},
    },
};

fn valid_reviews(reviews: Vec<Review>) -> Vec<Review> {
    reviews
        .into_iter()
        .filter(|r| match r.validate() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Ignoring review {}: {err}", r.id);
                false
            }
        })
        .collect()
}

/// Aggregated reviews of a listing; a failing backend yields an empty summary.
pub async fn load_review_summary<R>(repo: &R, listing_id: &str) -> ReviewSummary
where
    R: ReviewRepo,
{
    match repo.reviews_of_listing(listing_id).await {
        Ok(reviews) => summarize_reviews(&valid_reviews(reviews)),
        Err(err) => {
            log::warn!("Failed to load reviews of listing {listing_id}: {err}");
            ReviewSummary::default()
        }
    }
}

/// Loads a listing with its stored rating replaced by the
/// aggregate of its valid reviews.
pub async fn refresh_listing_rating<R>(
    repo: &R,
    listing_id: &str,
) -> Result<(BusinessListing, ReviewSummary)>
where
    R: ListingRepo + ReviewRepo,
{
    let mut listing = repo.get_listing(listing_id).await?;
    let reviews = valid_reviews(repo.reviews_of_listing(listing_id).await?);
    let summary = listing.review_summary(&reviews);
    apply_review_summary(&mut listing, &summary);
    Ok((listing, summary))
}

/// Keeps a review on this device until it can be submitted.
pub fn cache_local_review<S>(
    local: &LocalState<S>,
    listing_id: &str,
    rating: u8,
    comment: Option<&str>,
    now: Timestamp,
) -> Result<CachedReview>
where
    S: KeyValueStore,
{
    if !RatingValue::from(rating).is_valid() {
        return Err(ReviewInvalidation::Value.into());
    }
    let review = CachedReview {
        rating,
        comment: comment
            .map(|c| sanitize_input(c, DEFAULT_MAX_INPUT_LEN))
            .filter(|c| !c.is_empty()),
        author: None,
        created_at: Some(now.to_string()),
    };
    local.cache_review(listing_id, review.clone())?;
    Ok(review)
}
