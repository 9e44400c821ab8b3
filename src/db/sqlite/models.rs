//! Persisted document models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Collection names
pub const STATUS_CHECKS: &str = "status_checks";
pub const DOWNLOADS: &str = "downloads";
pub const RELOCATION_APPLICATIONS: &str = "relocation_applications";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Client heartbeat record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Lifecycle of a tracked download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Pending,
    Downloading,
    Completed,
    Failed,
}

impl DownloadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DownloadStatus::Completed | DownloadStatus::Failed)
    }
}

/// Simulated download record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadItem {
    pub id: String,
    pub filename: String,
    pub url: String,
    pub progress: f64,
    pub status: DownloadStatus,
    pub file_size: Option<u64>,
    pub downloaded_size: u64,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl DownloadItem {
    /// A fresh record, already in the `downloading` state
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            filename: filename.into(),
            url: url.into(),
            progress: 0.0,
            status: DownloadStatus::Downloading,
            file_size: None,
            downloaded_size: 0,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// Submitted relocation application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationApplication {
    pub id: String,
    pub opportunity_id: String,
    pub applicant_data: Map<String, Value>,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

impl RelocationApplication {
    pub fn new(opportunity_id: impl Into<String>, applicant_data: Map<String, Value>) -> Self {
        Self {
            id: new_id(),
            opportunity_id: opportunity_id.into(),
            applicant_data,
            status: "submitted".to_string(),
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_status_serialization() {
        assert_eq!(
            serde_json::to_string(&DownloadStatus::Downloading).unwrap(),
            "\"downloading\""
        );
        let status: DownloadStatus = serde_json::from_str("\"completed\"").unwrap();
        assert!(status.is_terminal());
        assert!(!DownloadStatus::Pending.is_terminal());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = StatusCheck::new("web");
        let b = StatusCheck::new("web");
        assert_ne!(a.id, b.id);

        let d = DownloadItem::new("file.zip", "https://example.com/file.zip");
        assert_eq!(d.status, DownloadStatus::Downloading);
        assert_eq!(d.progress, 0.0);
        assert!(d.completed_at.is_none());
    }
}
