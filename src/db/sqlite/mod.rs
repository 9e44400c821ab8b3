//! SQLite-backed document store

pub mod models;
mod connection;
mod documents;
mod migrations;

use crate::error::{AppError, Result};
pub use documents::Filter;
use parking_lot::Mutex;
use rusqlite::Connection;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Upper bound on the number of documents a single `find` returns
pub const MAX_FIND_RESULTS: usize = 1000;

/// Document store wrapper
///
/// Cheap to clone; all clones share one connection. Every call runs on the
/// blocking thread pool so async handlers never stall on disk I/O.
#[derive(Clone)]
pub struct DocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl DocumentStore {
    /// Open the store at `path`, or in memory when `path` is `None`
    pub fn open(path: Option<&Path>) -> Result<Self> {
        if let Some(parent) = path.and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = connection::create_connection(path)?;
        migrations::run_migrations(&conn)?;

        match path {
            Some(p) => tracing::info!("Document store opened at {:?}", p),
            None => tracing::info!("Document store opened in memory"),
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(None)
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            f(&conn)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Store task failed: {}", e)))?
    }

    // ========== Raw Document Methods ==========

    /// Store a record keyed by its `id` field
    pub async fn insert<T: Serialize>(&self, collection: &str, record: &T) -> Result<()> {
        let doc = serde_json::to_value(record)?;
        let collection = collection.to_string();
        self.with_conn(move |conn| documents::insert(conn, &collection, &doc))
            .await
    }

    /// Records matching `filter` in storage order, capped at `MAX_FIND_RESULTS`
    pub async fn find(&self, collection: &str, filter: Filter, limit: usize) -> Result<Vec<Value>> {
        let collection = collection.to_string();
        let limit = limit.min(MAX_FIND_RESULTS);
        self.with_conn(move |conn| documents::find(conn, &collection, &filter, limit))
            .await
    }

    pub async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let collection = collection.to_string();
        let id = id.to_string();
        self.with_conn(move |conn| documents::find_one(conn, &collection, &id))
            .await
    }

    /// Merge `fields` into an existing record; `NotFound` if it is absent
    pub async fn update(&self, collection: &str, id: &str, fields: Filter) -> Result<()> {
        let collection = collection.to_string();
        let id = id.to_string();
        self.with_conn(move |conn| documents::update(conn, &collection, &id, &fields))
            .await
    }

    /// Remove a record, returns how many were deleted (0 or 1)
    pub async fn delete(&self, collection: &str, id: &str) -> Result<usize> {
        let collection = collection.to_string();
        let id = id.to_string();
        self.with_conn(move |conn| documents::delete(conn, &collection, &id))
            .await
    }

    pub async fn count(&self, collection: &str) -> Result<usize> {
        let collection = collection.to_string();
        self.with_conn(move |conn| documents::count(conn, &collection))
            .await
    }

    // ========== Typed Methods ==========

    /// Every record in a collection, decoded into `T`
    pub async fn find_all_as<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        self.find(collection, Filter::new(), MAX_FIND_RESULTS)
            .await?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(AppError::from))
            .collect()
    }

    pub async fn find_one_as<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        self.find_one(collection, id)
            .await?
            .map(|doc| serde_json::from_value(doc).map_err(AppError::from))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::models::{DownloadItem, DownloadStatus, StatusCheck, DOWNLOADS, STATUS_CHECKS};
    use crate::scheduler::DownloadTracker;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_typed_round_trip() {
        let store = DocumentStore::open_in_memory().unwrap();
        let check = StatusCheck::new("dashboard");
        store.insert(STATUS_CHECKS, &check).await.unwrap();

        let loaded: StatusCheck = store
            .find_one_as(STATUS_CHECKS, &check.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.client_name, "dashboard");
        assert_eq!(loaded.timestamp, check.timestamp);
    }

    #[tokio::test]
    async fn test_find_is_capped() {
        let store = DocumentStore::open_in_memory().unwrap();
        for i in 0..(MAX_FIND_RESULTS + 5) {
            store
                .insert("bulk", &json!({"id": format!("doc-{}", i)}))
                .await
                .unwrap();
        }

        let docs = store.find("bulk", Filter::new(), usize::MAX).await.unwrap();
        assert_eq!(docs.len(), MAX_FIND_RESULTS);
        assert_eq!(store.count("bulk").await.unwrap(), MAX_FIND_RESULTS + 5);
    }

    #[tokio::test]
    async fn test_on_disk_store_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.db");

        {
            let store = DocumentStore::open(Some(&path)).unwrap();
            store.insert("downloads", &json!({"id": "a"})).await.unwrap();
        }

        let reopened = DocumentStore::open(Some(&path)).unwrap();
        assert!(reopened.find_one("downloads", "a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_download_marked_failed_when_progress_write_fails() {
        let store = DocumentStore::open_in_memory().unwrap();
        // Progress writes past 40% fail; marking the record failed still succeeds
        store
            .conn
            .lock()
            .execute_batch(
                "CREATE TRIGGER reject_progress BEFORE UPDATE ON documents
                 WHEN json_extract(NEW.data, '$.progress') >= 50
                  AND json_extract(NEW.data, '$.status') != 'failed'
                 BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
            )
            .unwrap();

        let tracker = DownloadTracker::new(store.clone(), Duration::from_millis(5));
        let item = tracker
            .start("broken.iso", "https://example.com/broken.iso")
            .await
            .unwrap();

        let mut failed = None;
        for _ in 0..200 {
            let current: DownloadItem = store.find_one_as(DOWNLOADS, &item.id).await.unwrap().unwrap();
            if current.status.is_terminal() {
                failed = Some(current);
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let failed = failed.unwrap();
        assert_eq!(failed.status, DownloadStatus::Failed);
        assert_eq!(failed.progress, 40.0);
        assert!(failed.completed_at.is_none());

        for _ in 0..100 {
            if tracker.active_count() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(tracker.active_count(), 0);
    }
}
