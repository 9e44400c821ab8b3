//! Simulated download progress
//!
//! Starting a download persists a record and spawns a task that bumps its
//! progress by `PROGRESS_INCREMENT` every tick until it reaches 100. The task
//! is never awaited by the request that started it. Live tasks are kept in a
//! registry keyed by download id so they can be aborted on delete or shutdown.

use crate::db::sqlite::models::{DownloadItem, DownloadStatus, DOWNLOADS};
use crate::db::{DocumentStore, Filter};
use crate::error::{AppError, Result};
use chrono::Utc;
use dashmap::DashMap;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Progress added on every tick, in percent
pub const PROGRESS_INCREMENT: f64 = 10.0;

const COMPLETE: f64 = 100.0;

/// Starts downloads and tracks their background progress tasks
pub struct DownloadTracker {
    store: DocumentStore,
    tick: Duration,
    tasks: Arc<DashMap<String, JoinHandle<()>>>,
}

impl DownloadTracker {
    pub fn new(store: DocumentStore, tick: Duration) -> Self {
        Self {
            store,
            tick,
            tasks: Arc::new(DashMap::new()),
        }
    }

    /// Persist a new download and start advancing its progress
    pub async fn start(&self, filename: &str, url: &str) -> Result<DownloadItem> {
        let item = DownloadItem::new(filename, url);
        self.store.insert(DOWNLOADS, &item).await?;

        info!("Starting download {} ({})", item.id, item.filename);
        self.spawn_progress(item.id.clone());

        Ok(item)
    }

    fn spawn_progress(&self, id: String) {
        let store = self.store.clone();
        let tasks = Arc::clone(&self.tasks);
        let tick = self.tick;
        let task_id = id.clone();
        let (registered_tx, registered_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            // Deregistering must not happen before the handle is registered
            if registered_rx.await.is_err() {
                return;
            }
            advance_progress(&store, &task_id, tick).await;
            tasks.remove(&task_id);
        });

        self.tasks.insert(id, handle);
        let _ = registered_tx.send(());
    }

    /// Current snapshot of a download
    pub async fn get(&self, id: &str) -> Result<DownloadItem> {
        self.store
            .find_one_as(DOWNLOADS, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Download not found".to_string()))
    }

    /// All downloads in creation order, at most `MAX_FIND_RESULTS`
    pub async fn list(&self) -> Result<Vec<DownloadItem>> {
        self.store.find_all_as(DOWNLOADS).await
    }

    /// Delete a download, stopping its progress task if still running
    pub async fn delete(&self, id: &str) -> Result<()> {
        let deleted = self.store.delete(DOWNLOADS, id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Download not found".to_string()));
        }

        if let Some((_, handle)) = self.tasks.remove(id) {
            handle.abort();
            debug!("Aborted progress task for download {}", id);
        }

        info!("Deleted download {}", id);
        Ok(())
    }

    /// Number of progress tasks still running
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Abort every running progress task
    pub fn shutdown(&self) {
        let ids: Vec<String> = self.tasks.iter().map(|entry| entry.key().clone()).collect();
        for id in ids {
            if let Some((_, handle)) = self.tasks.remove(&id) {
                handle.abort();
            }
        }
        info!("Download tracker stopped");
    }
}

impl Drop for DownloadTracker {
    fn drop(&mut self) {
        for entry in self.tasks.iter() {
            entry.value().abort();
        }
    }
}

fn progress_fields(progress: f64) -> Filter {
    let mut fields = Filter::new();
    fields.insert("progress".to_string(), json!(progress));
    if progress >= COMPLETE {
        fields.insert("status".to_string(), json!(DownloadStatus::Completed));
        fields.insert("completed_at".to_string(), json!(Utc::now()));
    } else {
        fields.insert("status".to_string(), json!(DownloadStatus::Downloading));
    }
    fields
}

/// Walk a download from 0 to 100, one step per tick
async fn advance_progress(store: &DocumentStore, id: &str, tick: Duration) {
    let steps = (COMPLETE / PROGRESS_INCREMENT) as u32;

    for step in 0..=steps {
        tokio::time::sleep(tick).await;

        let progress = (step as f64 * PROGRESS_INCREMENT).min(COMPLETE);
        match store.update(DOWNLOADS, id, progress_fields(progress)).await {
            Ok(()) => debug!("Download {} at {}%", id, progress),
            Err(AppError::NotFound(_)) => {
                info!("Download {} was removed, stopping progress", id);
                return;
            }
            Err(e) => {
                error!("Failed to record progress for download {}: {}", id, e);
                mark_failed(store, id).await;
                return;
            }
        }
    }

    info!("Download {} completed", id);
}

async fn mark_failed(store: &DocumentStore, id: &str) {
    let mut fields = Filter::new();
    fields.insert("status".to_string(), json!(DownloadStatus::Failed));

    if let Err(e) = store.update(DOWNLOADS, id, fields).await {
        warn!("Could not mark download {} as failed: {}", id, e);
    }
}
