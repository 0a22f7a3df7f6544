use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{Movie, MovieFilter, Review};
use crate::services::facets::{self, Facets};
use crate::services::reviews;
use crate::store::CatalogStore;

/// A filtered listing plus the facet lists that drive the filter controls.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub movies: Vec<Movie>,
    #[serde(flatten)]
    pub facets: Facets,
}

/// A single movie with its reviews and aggregate rating.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetail {
    pub movie: Movie,
    pub reviews: Vec<Review>,
    pub average_rating: f64,
}

/// Movies matching the filter, without facets.
///
/// Backs the partial re-render path. Runs the exact same store query as
/// [`browse`], so for a given filter the two always agree on the movies.
pub async fn filtered_movies(
    store: &dyn CatalogStore,
    filter: &MovieFilter,
) -> AppResult<Vec<Movie>> {
    store.find_movies(filter).await
}

/// The full browse payload: filtered movies plus whole-catalog facets.
pub async fn browse(store: &dyn CatalogStore, filter: &MovieFilter) -> AppResult<CatalogPage> {
    let (movies, facets) = tokio::try_join!(store.find_movies(filter), facets::build(store))?;

    Ok(CatalogPage { movies, facets })
}

/// A movie's detail view, or `NotFound` for an unknown id.
pub async fn movie_detail(store: &dyn CatalogStore, movie_id: i32) -> AppResult<MovieDetail> {
    let movie = store
        .find_movie(movie_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {movie_id} not found")))?;

    let reviews = store.reviews_for_movie(movie_id).await?;
    let average_rating = reviews::average_rating(&reviews);

    Ok(MovieDetail {
        movie,
        reviews,
        average_rating,
    })
}
