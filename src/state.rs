//! Application state management

use crate::config::AppConfig;
use crate::db::DocumentStore;
use crate::error::Result;
use crate::scheduler::DownloadTracker;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Document store connection
    pub store: DocumentStore,

    /// Download tracker and its background tasks
    pub downloads: Arc<DownloadTracker>,

    /// Configuration the server was started with
    pub config: AppConfig,
}

impl AppState {
    /// Open the store described by `config` and wire up services
    pub fn new(config: AppConfig) -> Result<Self> {
        let path = config.store_path()?;
        let store = DocumentStore::open(path.as_deref())?;
        Ok(Self::with_store(store, config))
    }

    /// Build state around an already opened store
    pub fn with_store(store: DocumentStore, config: AppConfig) -> Self {
        let downloads = Arc::new(DownloadTracker::new(store.clone(), config.download_tick()));
        Self {
            store,
            downloads,
            config,
        }
    }

    /// Stop background work before the process exits
    pub fn shutdown(&self) {
        self.downloads.shutdown();
    }
}
