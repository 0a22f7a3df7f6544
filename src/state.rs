use std::sync::Arc;

use crate::services::watchlist::WatchlistService;
use crate::store::{CatalogStore, SessionStore, WatchlistStore};

/// Shared application state
///
/// Stores are held behind trait objects so the same router serves the
/// Postgres/Redis pair in production and the in-memory pair in tests.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub watchlist: WatchlistService,
}

impl AppState {
    /// Wires the stores into application state
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        entries: Arc<dyn WatchlistStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let watchlist = WatchlistService::new(catalog.clone(), entries, sessions);
        Self { catalog, watchlist }
    }
}
