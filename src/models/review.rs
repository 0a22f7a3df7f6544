use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted review. A user may review the same movie any number of
/// times; there is deliberately no (user, movie) uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Review {
    pub id: i32,
    pub movie_id: i32,
    /// Stable identifier from the identity provider.
    pub user_id: i32,
    /// Submitted on a 1-5 scale; stored values are averaged as-is.
    pub rating: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a review; id and timestamp are store-assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub movie_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub text: String,
}
