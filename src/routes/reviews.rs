use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{Identity, Review};
use crate::services::reviews;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub rating: i32,
    pub text: String,
}

/// Handler for submitting a review of a movie
pub async fn submit(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(movie_id): Path<i32>,
    Json(request): Json<SubmitReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = reviews::submit(
        state.catalog.as_ref(),
        &identity,
        movie_id,
        request.rating,
        request.text,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
