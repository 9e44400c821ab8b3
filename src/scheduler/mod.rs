//! Scheduler module
//!
//! Background work that outlives the request which started it:
//! - Simulated download progress, one task per download

mod download_progress;

pub use download_progress::{DownloadTracker, PROGRESS_INCREMENT};
