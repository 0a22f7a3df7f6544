use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::AppResult;
use crate::models::{FilterParams, Movie, MovieFilter};
use crate::services::catalog::{self, CatalogPage, MovieDetail};
use crate::state::AppState;

/// Handler for the catalog listing: filtered movies plus facet lists
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<CatalogPage>> {
    let filter = MovieFilter::parse(params)?;
    let page = catalog::browse(state.catalog.as_ref(), &filter).await?;
    Ok(Json(page))
}

/// Handler for partial re-renders: just the movies matching the filter
pub async fn filtered(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<Vec<Movie>>> {
    let filter = MovieFilter::parse(params)?;
    let movies = catalog::filtered_movies(state.catalog.as_ref(), &filter).await?;
    Ok(Json(movies))
}

/// Handler for a single movie with its reviews and average rating
pub async fn detail(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> AppResult<Json<MovieDetail>> {
    let detail = catalog::movie_detail(state.catalog.as_ref(), movie_id).await?;
    Ok(Json(detail))
}
