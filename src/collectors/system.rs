// Host metrics via sysinfo. Refresh calls can block, so collection runs on the
// blocking pool around shared sysinfo handles.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sysinfo::{Disks, Networks, ProcessesToUpdate, System};

use super::SampleSource;
use crate::models::{NetworkIoBytes, SystemSample};

pub struct SysinfoSystemSource {
    sys: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    networks: Arc<std::sync::Mutex<Networks>>,
    last_cpu_refresh: Arc<std::sync::Mutex<Option<(Instant, f64)>>>,
}

impl Default for SysinfoSystemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSystemSource {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            disks: Arc::new(std::sync::Mutex::new(disks)),
            networks: Arc::new(std::sync::Mutex::new(networks)),
            last_cpu_refresh: Arc::new(std::sync::Mutex::new(None)),
        }
    }
}

#[async_trait]
impl SampleSource<SystemSample> for SysinfoSystemSource {
    async fn collect(&self) -> anyhow::Result<SystemSample> {
        let sys = self.sys.clone();
        let disks = self.disks.clone();
        let networks = self.networks.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;

            let now = Instant::now();
            let cpu_percent = if let Ok(mut guard) = last_cpu_refresh.lock() {
                if let Some((prev_ts, prev_usage)) = *guard {
                    if now.duration_since(prev_ts) >= sysinfo::MINIMUM_CPU_UPDATE_INTERVAL {
                        sys.refresh_cpu_all();
                        let usage = sys.global_cpu_usage() as f64;
                        *guard = Some((now, usage));
                        usage
                    } else {
                        // Too soon for a meaningful delta, reuse the cached reading
                        prev_usage
                    }
                } else {
                    // First call establishes the baseline
                    sys.refresh_cpu_all();
                    *guard = Some((now, 0.0));
                    0.0
                }
            } else {
                sys.refresh_cpu_all();
                0.0
            };

            sys.refresh_memory();
            let total_mem = sys.total_memory();
            let used_mem = total_mem.saturating_sub(sys.available_memory());
            let memory_percent = if total_mem > 0 {
                (used_mem as f64 / total_mem as f64) * 100.0
            } else {
                0.0
            };

            let process_count = sys.refresh_processes(ProcessesToUpdate::All, true) as u32;

            let disk_usage_percent = {
                let mut disks_guard = disks
                    .lock()
                    .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
                disks_guard.refresh(false);
                let (total, available) = disks_guard
                    .list()
                    .iter()
                    .fold((0u64, 0u64), |(t, a), d| {
                        (t + d.total_space(), a + d.available_space())
                    });
                if total > 0 {
                    (total.saturating_sub(available) as f64 / total as f64) * 100.0
                } else {
                    0.0
                }
            };

            let network_io_bytes = {
                let mut networks_guard = networks
                    .lock()
                    .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
                networks_guard.refresh(true);
                let (sent, recv) = networks_guard
                    .list()
                    .iter()
                    .fold((0u64, 0u64), |(s, r), (_, data)| {
                        (s + data.total_transmitted(), r + data.total_received())
                    });
                NetworkIoBytes {
                    bytes_sent: sent,
                    bytes_recv: recv,
                }
            };

            let load = System::load_average();

            Ok(SystemSample {
                timestamp: Utc::now(),
                cpu_percent: cpu_percent.clamp(0.0, 100.0),
                memory_percent,
                disk_usage_percent,
                network_io_bytes,
                process_count,
                load_average: [load.one, load.five, load.fifteen],
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}
