use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::AppResult;
use crate::models::{Movie, MovieFilter, NewReview, Review};
use crate::store::{CatalogStore, WatchlistStore};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Postgres-backed catalog, review, and watch-list storage.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Returns the connective for the next predicate, flipping `first` so the
/// WHERE keyword is emitted exactly once.
fn clause(first: &mut bool) -> &'static str {
    if std::mem::take(first) {
        " WHERE "
    } else {
        " AND "
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgStore {
    async fn find_movies(&self, filter: &MovieFilter) -> AppResult<Vec<Movie>> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, title, genre, director, year, description, poster_url FROM movies",
        );

        let mut first = true;
        if let Some(search) = &filter.search {
            query.push(clause(&mut first));
            query.push("title ILIKE ");
            query.push_bind(format!("%{search}%"));
        }
        if let Some(genre) = &filter.genre {
            query.push(clause(&mut first));
            query.push("genre ILIKE ");
            query.push_bind(format!("%{genre}%"));
        }
        if let Some(director) = &filter.director {
            query.push(clause(&mut first));
            query.push("director = ");
            query.push_bind(director.as_str());
        }
        if let Some(year) = filter.year {
            query.push(clause(&mut first));
            query.push("year = ");
            query.push_bind(year);
        }
        query.push(" ORDER BY id ASC");

        let movies = query
            .build_query_as::<Movie>()
            .fetch_all(&self.pool)
            .await?;

        Ok(movies)
    }

    async fn find_movie(&self, movie_id: i32) -> AppResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, genre, director, year, description, poster_url
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    async fn find_movies_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, title, genre, director, year, description, poster_url
            FROM movies
            WHERE id = ANY($1)
            ORDER BY id ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn distinct_genre_values(&self) -> AppResult<Vec<String>> {
        let values = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT genre
            FROM movies
            WHERE genre IS NOT NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    async fn distinct_directors(&self) -> AppResult<Vec<String>> {
        let directors = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT director
            FROM movies
            ORDER BY director ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(directors)
    }

    async fn distinct_years(&self) -> AppResult<Vec<i32>> {
        let years = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT DISTINCT year
            FROM movies
            ORDER BY year ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(years)
    }

    async fn reviews_for_movie(&self, movie_id: i32) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, movie_id, user_id, rating, text, created_at
            FROM reviews
            WHERE movie_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn reviews_for_user(&self, user_id: i32) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, movie_id, user_id, rating, text, created_at
            FROM reviews
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn insert_review(&self, review: NewReview) -> AppResult<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (movie_id, user_id, rating, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, movie_id, user_id, rating, text, created_at
            "#,
        )
        .bind(review.movie_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(review.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }
}

#[async_trait::async_trait]
impl WatchlistStore for PgStore {
    async fn movie_ids_for_user(&self, user_id: i32) -> AppResult<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT movie_id
            FROM watchlist_entries
            WHERE user_id = $1
            ORDER BY movie_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn add_entry(&self, user_id: i32, movie_id: i32) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO watchlist_entries (user_id, movie_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_entry(&self, user_id: i32, movie_id: i32) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM watchlist_entries
            WHERE user_id = $1 AND movie_id = $2
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
