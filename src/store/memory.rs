use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::{Movie, MovieFilter, NewReview, Review, SessionId};
use crate::store::{CatalogStore, SessionStore, WatchlistStore};

/// In-memory catalog, review, and watch-list storage.
///
/// Implements the same contracts as the Postgres backend against plain
/// collections, which is what the integration tests run against. Shares
/// the filter predicate with the SQL path via [`MovieFilter::matches`].
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    movies: HashMap<i32, Movie>,
    reviews: Vec<Review>,
    next_review_id: i32,
    watchlists: HashMap<i32, Vec<i32>>,
}

impl MemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a movie to the catalog, replacing any movie with the same id.
    pub async fn insert_movie(&self, movie: Movie) {
        let mut inner = self.inner.write().await;
        inner.movies.insert(movie.id, movie);
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryStore {
    async fn find_movies(&self, filter: &MovieFilter) -> AppResult<Vec<Movie>> {
        let inner = self.inner.read().await;
        let mut movies: Vec<Movie> = inner
            .movies
            .values()
            .filter(|movie| filter.matches(movie))
            .cloned()
            .collect();
        movies.sort_by_key(|movie| movie.id);
        Ok(movies)
    }

    async fn find_movie(&self, movie_id: i32) -> AppResult<Option<Movie>> {
        let inner = self.inner.read().await;
        Ok(inner.movies.get(&movie_id).cloned())
    }

    async fn find_movies_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Movie>> {
        let inner = self.inner.read().await;
        let unique: BTreeSet<i32> = ids.iter().copied().collect();
        Ok(unique
            .iter()
            .filter_map(|id| inner.movies.get(id).cloned())
            .collect())
    }

    async fn distinct_genre_values(&self) -> AppResult<Vec<String>> {
        let inner = self.inner.read().await;
        let values: BTreeSet<String> = inner
            .movies
            .values()
            .filter_map(|movie| movie.genre.clone())
            .collect();
        Ok(values.into_iter().collect())
    }

    async fn distinct_directors(&self) -> AppResult<Vec<String>> {
        let inner = self.inner.read().await;
        let directors: BTreeSet<String> = inner
            .movies
            .values()
            .map(|movie| movie.director.clone())
            .collect();
        Ok(directors.into_iter().collect())
    }

    async fn distinct_years(&self) -> AppResult<Vec<i32>> {
        let inner = self.inner.read().await;
        let years: BTreeSet<i32> = inner.movies.values().map(|movie| movie.year).collect();
        Ok(years.into_iter().collect())
    }

    async fn reviews_for_movie(&self, movie_id: i32) -> AppResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .iter()
            .filter(|review| review.movie_id == movie_id)
            .cloned()
            .collect())
    }

    async fn reviews_for_user(&self, user_id: i32) -> AppResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .iter()
            .filter(|review| review.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: NewReview) -> AppResult<Review> {
        let mut inner = self.inner.write().await;
        inner.next_review_id += 1;
        let review = Review {
            id: inner.next_review_id,
            movie_id: review.movie_id,
            user_id: review.user_id,
            rating: review.rating,
            text: review.text,
            created_at: Utc::now(),
        };
        inner.reviews.push(review.clone());
        Ok(review)
    }
}

#[async_trait::async_trait]
impl WatchlistStore for MemoryStore {
    async fn movie_ids_for_user(&self, user_id: i32) -> AppResult<Vec<i32>> {
        let inner = self.inner.read().await;
        let mut ids = inner.watchlists.get(&user_id).cloned().unwrap_or_default();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn add_entry(&self, user_id: i32, movie_id: i32) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let list = inner.watchlists.entry(user_id).or_default();
        if !list.contains(&movie_id) {
            list.push(movie_id);
        }
        Ok(())
    }

    async fn remove_entry(&self, user_id: i32, movie_id: i32) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(list) = inner.watchlists.get_mut(&user_id) {
            list.retain(|id| *id != movie_id);
        }
        Ok(())
    }
}

/// In-memory guest watch lists, without expiry.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<HashMap<SessionId, Vec<i32>>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn guest_list(&self, session: &SessionId) -> AppResult<Vec<i32>> {
        let inner = self.inner.read().await;
        Ok(inner.get(session).cloned().unwrap_or_default())
    }

    async fn put_guest_list(&self, session: &SessionId, movie_ids: &[i32]) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.insert(*session, movie_ids.to_vec());
        Ok(())
    }
}
