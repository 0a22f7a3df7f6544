use crate::error::{AppError, AppResult};
use crate::models::{Identity, NewReview, Review};
use crate::store::CatalogStore;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Mean rating rounded to one decimal place, or 0.0 when there are no
/// reviews. Whatever is stored gets averaged; range enforcement happens
/// at submission time only.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let sum: i64 = reviews.iter().map(|review| i64::from(review.rating)).sum();
    let mean = sum as f64 / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Validates and persists a review.
///
/// Only signed-in users may review; guests are rejected before anything
/// else is checked. The movie must exist, and the rating must fall within
/// [`MIN_RATING`]..=[`MAX_RATING`]. A user may review the same movie more
/// than once; every submission is kept.
pub async fn submit(
    store: &dyn CatalogStore,
    identity: &Identity,
    movie_id: i32,
    rating: i32,
    text: String,
) -> AppResult<Review> {
    let user_id = match identity {
        Identity::Authenticated { user_id } => *user_id,
        Identity::Guest { .. } => return Err(AppError::Unauthenticated),
    };

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::InvalidInput(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }

    store
        .find_movie(movie_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {movie_id} not found")))?;

    let review = store
        .insert_review(NewReview {
            movie_id,
            user_id,
            rating,
            text,
        })
        .await?;

    tracing::info!(movie_id, user_id, rating, "Review submitted");

    Ok(review)
}
