use redis::AsyncCommands;
use redis::Client;
use std::fmt::Display;

use crate::error::AppError;
use crate::error::AppResult;
use crate::models::SessionId;
use crate::store::SessionStore;

/// How long a guest list survives without activity. Every write refreshes
/// the expiry, so active guests keep their lists indefinitely.
const SESSION_TTL_SECONDS: u64 = 604800; // 1 week in seconds

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionKey {
    GuestList(SessionId),
}

impl Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKey::GuestList(session) => write!(f, "guest-list:{}", session),
        }
    }
}

/// Creates a Redis client for session storage
///
/// Establishes a connection to Redis for guest watch-list persistence.
/// Uses connection pooling via the connection-manager feature.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed guest watch lists.
///
/// Writes are awaited before the caller sees success. A guest whose save
/// was acknowledged must find the movie on their list, so there is no
/// fire-and-forget path here.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis_client: Client,
}

impl RedisSessionStore {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn guest_list(&self, session: &SessionId) -> AppResult<Vec<i32>> {
        let key = SessionKey::GuestList(*session);
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let stored: Option<String> = conn.get(format!("{}", key)).await?;

        match stored {
            Some(json) => {
                let movie_ids = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Session deserialization error: {}", e))
                })?;
                Ok(movie_ids)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn put_guest_list(&self, session: &SessionId, movie_ids: &[i32]) -> AppResult<()> {
        let key = SessionKey::GuestList(*session);
        let json = serde_json::to_string(movie_ids)
            .map_err(|e| AppError::Internal(format!("Session serialization error: {}", e)))?;

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn
            .set_ex(format!("{}", key), json, SESSION_TTL_SECONDS)
            .await?;

        Ok(())
    }
}
