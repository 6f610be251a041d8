//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Store;

/// Application state shared across all handlers.
///
/// Cheap to clone; the configuration and store handle live behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: Option<Store>,
}

impl AppState {
    /// Build the application state.
    ///
    /// `store` is `None` when the document store was not configured or could
    /// not be reached at startup; handlers that need it report it unavailable.
    #[must_use]
    pub fn new(config: AppConfig, store: Option<Store>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// The process-wide configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// The document store handle, if available.
    #[must_use]
    pub fn store(&self) -> Option<&Store> {
        self.inner.store.as_ref()
    }
}
