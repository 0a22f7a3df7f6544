use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::{Identity, Movie};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddToListRequest {
    pub movie_id: i32,
}

#[derive(Debug, Serialize)]
pub struct WatchlistResponse {
    pub movies: Vec<Movie>,
}

/// Handler for viewing the caller's watch list
pub async fn view(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<WatchlistResponse>> {
    let movies = state.watchlist.view(&identity).await?;
    Ok(Json(WatchlistResponse { movies }))
}

/// Handler for saving a movie to the caller's watch list
pub async fn add(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<AddToListRequest>,
) -> AppResult<StatusCode> {
    state.watchlist.add(&identity, request.movie_id).await?;
    Ok(StatusCode::OK)
}

/// Handler for removing a movie from the caller's watch list
pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(movie_id): Path<i32>,
) -> AppResult<StatusCode> {
    state.watchlist.remove(&identity, movie_id).await?;
    Ok(StatusCode::OK)
}
