use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// Movies are created by catalog ingestion (outside this service) and are
/// immutable afterwards. `genre` holds a comma-delimited tag list such as
/// `"Comedy, Drama"` and may be absent; the facet index splits it into
/// individual tags, while the genre filter matches against the raw field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Movie {
    /// Store-assigned identifier; every listing orders ascending by id.
    pub id: i32,
    pub title: String,
    pub genre: Option<String>,
    pub director: String,
    pub year: i32,
    /// Descriptive only, never filtered on.
    pub description: Option<String>,
    pub poster_url: Option<String>,
}

impl Movie {
    /// Creates a movie with the filterable fields set; used by seed data
    /// and the in-memory store.
    pub fn new(id: i32, title: &str, genre: Option<&str>, director: &str, year: i32) -> Self {
        Self {
            id,
            title: title.to_string(),
            genre: genre.map(str::to_string),
            director: director.to_string(),
            year,
            description: None,
            poster_url: None,
        }
    }
}
