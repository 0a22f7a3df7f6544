use std::collections::HashMap;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::Identity;
use crate::services::watchlist::WatchlistService;
use crate::store::CatalogStore;

/// One of the user's reviews, joined with the movie it covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReview {
    pub movie_id: i32,
    pub movie_title: String,
    pub rating: i32,
    pub text: String,
}

/// A signed-in user's activity summary.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub saved_count: usize,
    pub reviews: Vec<DashboardReview>,
}

/// Assembles the dashboard for a signed-in user.
///
/// Guests have no dashboard. Reviews are joined with their movie titles;
/// a review whose movie has left the catalog is dropped from the summary,
/// matching how the watch-list view treats stale ids.
pub async fn assemble(
    store: &dyn CatalogStore,
    watchlist: &WatchlistService,
    identity: &Identity,
) -> AppResult<Dashboard> {
    let user_id = match identity {
        Identity::Authenticated { user_id } => *user_id,
        Identity::Guest { .. } => return Err(AppError::Unauthenticated),
    };

    let saved_count = watchlist.movie_ids(identity).await?.len();
    let reviews = store.reviews_for_user(user_id).await?;

    let movie_ids: Vec<i32> = reviews.iter().map(|review| review.movie_id).collect();
    let movies = store.find_movies_by_ids(&movie_ids).await?;
    let titles: HashMap<i32, String> = movies
        .into_iter()
        .map(|movie| (movie.id, movie.title))
        .collect();

    let reviews = reviews
        .into_iter()
        .filter_map(|review| {
            titles.get(&review.movie_id).map(|title| DashboardReview {
                movie_id: review.movie_id,
                movie_title: title.clone(),
                rating: review.rating,
                text: review.text,
            })
        })
        .collect();

    Ok(Dashboard {
        saved_count,
        reviews,
    })
}
