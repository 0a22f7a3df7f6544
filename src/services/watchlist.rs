use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Identity, Movie};
use crate::store::{CatalogStore, SessionStore, WatchlistStore};

/// One watch list per caller: durable rows for signed-in users, an
/// expiring session list for guests.
///
/// Every operation branches on [`Identity`] exactly once, here. Handlers
/// stay backend-agnostic, and the two backends can never be touched for
/// the wrong kind of caller.
#[derive(Clone)]
pub struct WatchlistService {
    catalog: Arc<dyn CatalogStore>,
    entries: Arc<dyn WatchlistStore>,
    sessions: Arc<dyn SessionStore>,
}

impl WatchlistService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        entries: Arc<dyn WatchlistStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            catalog,
            entries,
            sessions,
        }
    }

    /// Ids of the caller's saved movies, whichever backend holds them.
    pub async fn movie_ids(&self, identity: &Identity) -> AppResult<Vec<i32>> {
        match identity {
            Identity::Authenticated { user_id } => self.entries.movie_ids_for_user(*user_id).await,
            Identity::Guest { session } => self.sessions.guest_list(session).await,
        }
    }

    /// The caller's saved movies resolved against the catalog.
    ///
    /// Saved ids whose movie has since left the catalog are dropped from
    /// the view rather than reported as errors.
    pub async fn view(&self, identity: &Identity) -> AppResult<Vec<Movie>> {
        let ids = self.movie_ids(identity).await?;
        self.catalog.find_movies_by_ids(&ids).await
    }

    /// Saves a movie to the caller's list.
    ///
    /// Validates the movie against the catalog before any write, so a
    /// rejected save leaves both backends untouched. Saving a movie that
    /// is already on the list succeeds without changing anything; for
    /// guests that also skips the session write, leaving the stored list
    /// byte-for-byte as it was.
    pub async fn add(&self, identity: &Identity, movie_id: i32) -> AppResult<()> {
        self.require_movie(movie_id).await?;

        match identity {
            Identity::Authenticated { user_id } => {
                self.entries.add_entry(*user_id, movie_id).await?;
            }
            Identity::Guest { session } => {
                let mut ids = self.sessions.guest_list(session).await?;
                if !ids.contains(&movie_id) {
                    ids.push(movie_id);
                    self.sessions.put_guest_list(session, &ids).await?;
                }
            }
        }

        tracing::debug!(movie_id, identity = ?identity, "Movie saved to watch list");
        Ok(())
    }

    /// Removes a movie from the caller's list.
    ///
    /// An unknown movie id is `NotFound` even when a stale copy of it is
    /// sitting in a guest list; removing a known movie that simply is not
    /// on the list is a quiet no-op.
    pub async fn remove(&self, identity: &Identity, movie_id: i32) -> AppResult<()> {
        self.require_movie(movie_id).await?;

        match identity {
            Identity::Authenticated { user_id } => {
                self.entries.remove_entry(*user_id, movie_id).await?;
            }
            Identity::Guest { session } => {
                let ids = self.sessions.guest_list(session).await?;
                if ids.contains(&movie_id) {
                    let ids: Vec<i32> = ids.into_iter().filter(|id| *id != movie_id).collect();
                    self.sessions.put_guest_list(session, &ids).await?;
                }
            }
        }

        tracing::debug!(movie_id, identity = ?identity, "Movie removed from watch list");
        Ok(())
    }

    async fn require_movie(&self, movie_id: i32) -> AppResult<()> {
        self.catalog
            .find_movie(movie_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie {movie_id} not found")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Movie, SessionId};
    use crate::store::{
        MemorySessionStore, MockCatalogStore, MockSessionStore, MockWatchlistStore,
    };

    /// A catalog that knows exactly the given movie ids.
    fn catalog_with_movies(ids: &[i32]) -> MockCatalogStore {
        let known = ids.to_vec();
        let mut catalog = MockCatalogStore::new();
        catalog.expect_find_movie().returning(move |id| {
            Ok(known
                .contains(&id)
                .then(|| Movie::new(id, "Seeded", None, "Someone", 2000)))
        });
        catalog
    }

    fn service(
        catalog: MockCatalogStore,
        entries: MockWatchlistStore,
        sessions: MockSessionStore,
    ) -> WatchlistService {
        WatchlistService::new(Arc::new(catalog), Arc::new(entries), Arc::new(sessions))
    }

    #[tokio::test]
    async fn test_authenticated_add_goes_to_durable_entries_only() {
        let mut entries = MockWatchlistStore::new();
        entries
            .expect_add_entry()
            .withf(|user_id, movie_id| *user_id == 7 && *movie_id == 3)
            .returning(|_, _| Ok(()));

        // An unconfigured session store panics if touched, proving the
        // authenticated path never reaches it.
        let service = service(
            catalog_with_movies(&[3]),
            entries,
            MockSessionStore::new(),
        );
        let identity = Identity::Authenticated { user_id: 7 };

        service.add(&identity, 3).await.unwrap();
    }

    #[tokio::test]
    async fn test_guest_add_appends_to_session_list() {
        let sessions = MemorySessionStore::new();
        let service = WatchlistService::new(
            Arc::new(catalog_with_movies(&[1, 3])),
            Arc::new(MockWatchlistStore::new()),
            Arc::new(sessions.clone()),
        );
        let session = SessionId::new();
        let identity = Identity::Guest { session };

        service.add(&identity, 3).await.unwrap();
        service.add(&identity, 1).await.unwrap();

        assert_eq!(sessions.guest_list(&session).await.unwrap(), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_guest_readd_skips_the_session_write() {
        let mut sessions = MockSessionStore::new();
        sessions.expect_guest_list().returning(|_| Ok(vec![3]));
        sessions.expect_put_guest_list().never();

        let service = service(catalog_with_movies(&[3]), MockWatchlistStore::new(), sessions);
        let identity = Identity::Guest {
            session: SessionId::new(),
        };

        service.add(&identity, 3).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_unknown_movie_writes_nothing() {
        let service = service(
            catalog_with_movies(&[]),
            MockWatchlistStore::new(),
            MockSessionStore::new(),
        );
        let identity = Identity::Authenticated { user_id: 7 };

        let err = service.add(&identity, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_unknown_movie_is_not_found_even_if_listed() {
        // A stale guest list still holding id 99 does not make the movie
        // removable once it is gone from the catalog.
        let mut sessions = MockSessionStore::new();
        sessions.expect_guest_list().never();
        sessions.expect_put_guest_list().never();

        let service = service(catalog_with_movies(&[]), MockWatchlistStore::new(), sessions);
        let identity = Identity::Guest {
            session: SessionId::new(),
        };

        let err = service.remove(&identity, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_guest_remove_of_unlisted_movie_skips_the_write() {
        let mut sessions = MockSessionStore::new();
        sessions.expect_guest_list().returning(|_| Ok(vec![1]));
        sessions.expect_put_guest_list().never();

        let service = service(catalog_with_movies(&[1, 3]), MockWatchlistStore::new(), sessions);
        let identity = Identity::Guest {
            session: SessionId::new(),
        };

        service.remove(&identity, 3).await.unwrap();
    }

    #[tokio::test]
    async fn test_guest_remove_rewrites_remaining_list() {
        let mut sessions = MockSessionStore::new();
        sessions.expect_guest_list().returning(|_| Ok(vec![1, 3, 5]));
        sessions
            .expect_put_guest_list()
            .withf(|_, ids| ids == [1, 5])
            .returning(|_, _| Ok(()));

        let service = service(
            catalog_with_movies(&[1, 3, 5]),
            MockWatchlistStore::new(),
            sessions,
        );
        let identity = Identity::Guest {
            session: SessionId::new(),
        };

        service.remove(&identity, 3).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut entries = MockWatchlistStore::new();
        entries
            .expect_add_entry()
            .returning(|_, _| Err(AppError::Database(sqlx::Error::PoolClosed)));

        let service = service(catalog_with_movies(&[3]), entries, MockSessionStore::new());
        let identity = Identity::Authenticated { user_id: 7 };

        let err = service.add(&identity, 3).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_view_resolves_ids_against_catalog() {
        let mut catalog = catalog_with_movies(&[]);
        catalog
            .expect_find_movies_by_ids()
            .withf(|ids| ids == [2, 4])
            .returning(|_| {
                Ok(vec![
                    Movie::new(2, "Alien", Some("Horror"), "Ridley Scott", 1979),
                    Movie::new(4, "Brazil", Some("Sci-Fi"), "Terry Gilliam", 1985),
                ])
            });

        let mut entries = MockWatchlistStore::new();
        entries
            .expect_movie_ids_for_user()
            .returning(|_| Ok(vec![2, 4]));

        let service = service(catalog, entries, MockSessionStore::new());
        let identity = Identity::Authenticated { user_id: 7 };

        let movies = service.view(&identity).await.unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Brazil"]);
    }
}
