//! System Service
//!
//! Host telemetry: CPU, memory, disk, network counters and uptime.
//! Every call takes a fresh sample; nothing is cached between requests.

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, Networks, RefreshKind, System};
use tracing::info;

/// Window over which CPU utilization is averaged
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Point-in-time resource usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPerformance {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    pub uptime: String,
    pub network_sent: u64,
    pub network_recv: u64,
    pub timestamp: DateTime<Utc>,
}

/// Static host description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub platform: String,
    pub platform_version: String,
    pub architecture: String,
    pub processor: String,
    pub hostname: String,
    pub runtime_version: String,
}

/// Render uptime as `{days}d {hours}h {minutes}m`
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    format!("{}d {}h {}m", days, hours, minutes)
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (used as f64 / total as f64) * 100.0
    }
}

/// Usage of the root filesystem, or of all disks when `/` is not listed
fn disk_percent(disks: &Disks) -> f64 {
    let usage = |disk: &sysinfo::Disk| {
        let total = disk.total_space();
        (total.saturating_sub(disk.available_space()), total)
    };

    if let Some(root) = disks.list().iter().find(|d| d.mount_point() == Path::new("/")) {
        let (used, total) = usage(root);
        return percent(used, total);
    }

    let (used, total) = disks
        .list()
        .iter()
        .map(usage)
        .fold((0u64, 0u64), |(u, t), (du, dt)| (u.saturating_add(du), t.saturating_add(dt)));
    percent(used, total)
}

/// System telemetry service
pub struct SystemService;

impl SystemService {
    async fn blocking<T, F>(f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        tokio::task::spawn_blocking(f)
            .await
            .map_err(|e| AppError::Telemetry(format!("Telemetry task failed: {}", e)))?
    }

    /// Sample current resource usage
    ///
    /// CPU usage needs two refreshes separated by `CPU_SAMPLE_WINDOW`, so this
    /// takes at least that long to return.
    pub async fn performance() -> Result<SystemPerformance> {
        let mut sys = Self::blocking(|| {
            let mut sys = System::new_with_specifics(
                RefreshKind::new()
                    .with_cpu(CpuRefreshKind::new().with_cpu_usage())
                    .with_memory(MemoryRefreshKind::new().with_ram()),
            );
            sys.refresh_cpu_usage();
            Ok(sys)
        })
        .await?;

        tokio::time::sleep(CPU_SAMPLE_WINDOW.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)).await;

        Self::blocking(move || {
            sys.refresh_cpu_usage();
            sys.refresh_memory();

            let total_memory = sys.total_memory();
            if total_memory == 0 {
                return Err(AppError::Telemetry("memory information unavailable".to_string()));
            }

            let disks = Disks::new_with_refreshed_list();
            let networks = Networks::new_with_refreshed_list();
            let (network_sent, network_recv) = networks
                .list()
                .iter()
                .fold((0u64, 0u64), |(sent, recv), (_, data)| {
                    (
                        sent.saturating_add(data.total_transmitted()),
                        recv.saturating_add(data.total_received()),
                    )
                });

            let now = Utc::now();
            let uptime_secs = (now.timestamp().max(0) as u64).saturating_sub(System::boot_time());

            Ok(SystemPerformance {
                cpu_percent: sys.global_cpu_usage() as f64,
                memory_percent: percent(sys.used_memory(), total_memory),
                disk_percent: disk_percent(&disks),
                uptime: format_uptime(uptime_secs),
                network_sent,
                network_recv,
                timestamp: now,
            })
        })
        .await
    }

    /// Describe the host this server runs on
    pub async fn info() -> Result<SystemInfo> {
        info!("SystemService::info");

        Self::blocking(|| {
            let sys = System::new_with_specifics(
                RefreshKind::new().with_cpu(CpuRefreshKind::new()),
            );
            let unknown = || "Unknown".to_string();

            Ok(SystemInfo {
                platform: System::name().unwrap_or_else(unknown),
                platform_version: System::long_os_version()
                    .or_else(System::os_version)
                    .unwrap_or_else(unknown),
                architecture: std::env::consts::ARCH.to_string(),
                processor: sys
                    .cpus()
                    .first()
                    .map(|c| c.brand().trim().to_string())
                    .filter(|brand| !brand.is_empty())
                    .unwrap_or_else(unknown),
                hostname: System::host_name().unwrap_or_else(unknown),
                runtime_version: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            })
        })
        .await
    }
}
