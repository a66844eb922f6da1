use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::store::AlbumStore;

/// The shared application state.
///
/// Cloned into every request by Axum. The store's connection pool is the only
/// resource shared between requests; SQLite serializes the writes.
#[derive(Clone)]
pub struct AppState {
    /// The album collection.
    pub store: AlbumStore,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Album lifecycle counters.
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self { store: AlbumStore::new(db), config: Arc::new(config), metrics: Metrics::new() }
    }
}
