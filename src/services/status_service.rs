//! Status Service
//!
//! Client status checks, kept for compatibility with older dashboards.

use crate::db::sqlite::models::{StatusCheck, STATUS_CHECKS};
use crate::db::DocumentStore;
use crate::error::Result;
use tracing::info;

pub struct StatusService;

impl StatusService {
    /// Record a status check for `client_name`
    pub async fn create(store: &DocumentStore, client_name: &str) -> Result<StatusCheck> {
        info!("StatusService::create - {}", client_name);

        let check = StatusCheck::new(client_name);
        store.insert(STATUS_CHECKS, &check).await?;
        Ok(check)
    }

    /// Status checks in insertion order, at most `MAX_FIND_RESULTS`
    pub async fn list(store: &DocumentStore) -> Result<Vec<StatusCheck>> {
        store.find_all_as(STATUS_CHECKS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_list() {
        let store = DocumentStore::open_in_memory().unwrap();
        let first = StatusService::create(&store, "web").await.unwrap();
        let second = StatusService::create(&store, "mobile").await.unwrap();
        assert_ne!(first.id, second.id);

        let checks = StatusService::list(&store).await.unwrap();
        let names: Vec<_> = checks.iter().map(|c| c.client_name.as_str()).collect();
        assert_eq!(names, ["web", "mobile"]);
    }
}
