//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    admin::AdminRegistry,
    config::Config,
    pagination::{CountBackend, CountCache, CountOptions, PgCountBackend},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    db: PgPool,

    /// Row counting against the database
    count_backend: Arc<dyn CountBackend>,

    /// Shared cache of listing counts
    count_cache: Arc<dyn CountCache>,

    /// Admin listings
    registry: AdminRegistry,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state counting rows in `db`
    pub fn new(db: PgPool, count_cache: Arc<dyn CountCache>, registry: AdminRegistry, config: Config) -> Self {
        let count_backend = Arc::new(PgCountBackend::new(db.clone()));
        Self::from_parts(db, count_backend, count_cache, registry, config)
    }

    /// Create a state with an explicit count backend
    pub fn from_parts(
        db: PgPool,
        count_backend: Arc<dyn CountBackend>,
        count_cache: Arc<dyn CountCache>,
        registry: AdminRegistry,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                count_backend,
                count_cache,
                registry,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub fn count_backend(&self) -> Arc<dyn CountBackend> {
        self.inner.count_backend.clone()
    }

    pub fn count_cache(&self) -> Arc<dyn CountCache> {
        self.inner.count_cache.clone()
    }

    pub fn count_options(&self) -> CountOptions {
        CountOptions::from(&self.inner.config.pagination)
    }

    /// Get a reference to the admin listings
    pub fn registry(&self) -> &AdminRegistry {
        &self.inner.registry
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
