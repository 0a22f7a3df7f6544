pub mod memory;
pub mod postgres;
pub mod redis;

pub use memory::{MemorySessionStore, MemoryStore};
pub use postgres::{create_pool, PgStore};
pub use redis::{create_redis_client, RedisSessionStore};

use crate::error::AppResult;
use crate::models::{Movie, MovieFilter, NewReview, Review, SessionId};

/// Read/write access to the movie catalog and its reviews.
///
/// Filtering happens inside the store so each backend can use its native
/// mechanism (SQL for Postgres, predicate evaluation in memory). All
/// listing methods return movies in ascending id order, which is what
/// keeps full-page and partial renders of the same filter identical.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch all movies satisfying the filter, ordered by ascending id.
    async fn find_movies(&self, filter: &MovieFilter) -> AppResult<Vec<Movie>>;

    /// Fetch a single movie, or `None` if the id is unknown.
    async fn find_movie(&self, movie_id: i32) -> AppResult<Option<Movie>>;

    /// Fetch the movies with the given ids, ordered by ascending id.
    ///
    /// Ids with no backing movie are silently skipped and duplicate ids
    /// yield their movie once, so the result may be shorter than the
    /// input.
    async fn find_movies_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Movie>>;

    /// Distinct non-null raw genre strings, e.g. `"Comedy, Romance"`.
    ///
    /// Splitting into individual tags is the facet builder's job, not the
    /// store's.
    async fn distinct_genre_values(&self) -> AppResult<Vec<String>>;

    /// Distinct directors in ascending order.
    async fn distinct_directors(&self) -> AppResult<Vec<String>>;

    /// Distinct release years in ascending order.
    async fn distinct_years(&self) -> AppResult<Vec<i32>>;

    /// All reviews for a movie, oldest first.
    async fn reviews_for_movie(&self, movie_id: i32) -> AppResult<Vec<Review>>;

    /// All reviews written by a user, oldest first.
    async fn reviews_for_user(&self, user_id: i32) -> AppResult<Vec<Review>>;

    /// Persist a review and return it with its assigned id and timestamp.
    async fn insert_review(&self, review: NewReview) -> AppResult<Review>;
}

/// Durable per-user watch lists, keyed by account id.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Ids of the movies on the user's list, ordered by ascending id.
    async fn movie_ids_for_user(&self, user_id: i32) -> AppResult<Vec<i32>>;

    /// Add a movie to the user's list. Adding a movie already on the list
    /// is a no-op, not an error.
    async fn add_entry(&self, user_id: i32, movie_id: i32) -> AppResult<()>;

    /// Remove a movie from the user's list. Removing a movie that is not
    /// on the list is a no-op.
    async fn remove_entry(&self, user_id: i32, movie_id: i32) -> AppResult<()>;
}

/// Expiring guest watch lists, keyed by session id.
///
/// Guests get whole-list reads and writes rather than per-entry updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// The guest's saved movie ids. An unknown or expired session yields
    /// an empty list.
    async fn guest_list(&self, session: &SessionId) -> AppResult<Vec<i32>>;

    /// Replace the guest's list and refresh its expiry.
    async fn put_guest_list(&self, session: &SessionId, movie_ids: &[i32]) -> AppResult<()>;
}
