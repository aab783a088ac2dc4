//! Application state shared across handlers.

use std::sync::Arc;

use meridian_catalog::CatalogClient;

use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: CatalogClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}
