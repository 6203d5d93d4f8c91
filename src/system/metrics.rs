//! Host metrics sampling via sysinfo
//!
//! Every call re-samples; nothing is cached. CPU usage needs two refreshes
//! separated by the crate's minimum update interval, so sampling takes that
//! long by design.

use crate::error::Result;
use serde::Serialize;
use std::sync::Mutex;
use sysinfo::{Disks, Networks, System};

/// One point-in-time snapshot of host load
#[derive(Debug, Clone, Serialize)]
pub struct LoadSnapshot {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub load_average: f64,
}

/// Sampler holding the retained sysinfo state between refreshes
pub struct MetricsSampler {
    system: Mutex<System>,
}

impl Default for MetricsSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSampler {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new_all()),
        }
    }

    /// Refresh CPU twice with the mandated pause, then read usage.
    /// The lock is not held across the await.
    async fn refresh_cpu(&self) -> f64 {
        {
            let mut system = self.system.lock().unwrap();
            system.refresh_cpu();
        }
        tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;

        let mut system = self.system.lock().unwrap();
        system.refresh_cpu();
        system.global_cpu_info().cpu_usage() as f64
    }

    fn memory_percent(system: &System) -> f64 {
        let total = system.total_memory();
        if total == 0 {
            return 0.0;
        }
        system.used_memory() as f64 / total as f64 * 100.0
    }

    fn disk_percent() -> f64 {
        let disks = Disks::new_with_refreshed_list();
        let (total, available) = disks
            .list()
            .iter()
            .fold((0u64, 0u64), |(total, available), disk| {
                (total + disk.total_space(), available + disk.available_space())
            });
        if total == 0 {
            return 0.0;
        }
        (total - available) as f64 / total as f64 * 100.0
    }

    /// Sample CPU, memory, disk and load average
    pub async fn sample(&self) -> Result<LoadSnapshot> {
        let cpu_usage = self.refresh_cpu().await;

        let memory_usage = {
            let mut system = self.system.lock().unwrap();
            system.refresh_memory();
            Self::memory_percent(&system)
        };

        Ok(LoadSnapshot {
            cpu_usage,
            memory_usage,
            disk_usage: Self::disk_percent(),
            load_average: System::load_average().one,
        })
    }

    /// Detailed per-core CPU, memory, swap, disk and network metrics
    pub async fn performance(&self) -> Result<serde_json::Value> {
        let _ = self.refresh_cpu().await;

        let (cpu, memory) = {
            let mut system = self.system.lock().unwrap();
            system.refresh_memory();

            let per_core: Vec<f64> = system
                .cpus()
                .iter()
                .map(|cpu| cpu.cpu_usage() as f64)
                .collect();
            let frequency_mhz = system.cpus().first().map(|cpu| cpu.frequency());

            let gib = 1024.0 * 1024.0 * 1024.0;
            let swap_total = system.total_swap();
            let swap_percent = if swap_total == 0 {
                0.0
            } else {
                system.used_swap() as f64 / swap_total as f64 * 100.0
            };

            let cpu = serde_json::json!({
                "count": system.cpus().len(),
                "usage_percent": per_core,
                "frequency_mhz": frequency_mhz,
            });
            let memory = serde_json::json!({
                "total_gb": system.total_memory() as f64 / gib,
                "available_gb": system.available_memory() as f64 / gib,
                "used_percent": Self::memory_percent(&system),
                "swap_used_percent": swap_percent,
            });
            (cpu, memory)
        };

        let gib = 1024.0 * 1024.0 * 1024.0;
        let disks = Disks::new_with_refreshed_list();
        let (disk_total, disk_available) = disks
            .list()
            .iter()
            .fold((0u64, 0u64), |(total, available), disk| {
                (total + disk.total_space(), available + disk.available_space())
            });
        let disk_used_percent = if disk_total == 0 {
            0.0
        } else {
            (disk_total - disk_available) as f64 / disk_total as f64 * 100.0
        };

        let networks = Networks::new_with_refreshed_list();
        let (bytes_received, bytes_transmitted) = networks
            .list()
            .iter()
            .fold((0u64, 0u64), |(rx, tx), (_, data)| {
                (rx + data.total_received(), tx + data.total_transmitted())
            });

        Ok(serde_json::json!({
            "cpu": cpu,
            "memory": memory,
            "disk": {
                "total_gb": disk_total as f64 / gib,
                "free_gb": disk_available as f64 / gib,
                "used_percent": disk_used_percent,
            },
            "network": {
                "bytes_recv": bytes_received,
                "bytes_sent": bytes_transmitted,
            },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
    }

    /// Host platform description, e.g. "Linux 6.8"
    pub fn platform() -> String {
        let name = System::name().unwrap_or_else(|| "Unknown".to_string());
        match System::os_version() {
            Some(version) => format!("{} {}", name, version),
            None => name,
        }
    }

    /// Host uptime in seconds
    pub fn uptime_secs() -> u64 {
        System::uptime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_yields_plausible_percentages() {
        let sampler = MetricsSampler::new();
        let snapshot = sampler.sample().await.unwrap();

        assert!(snapshot.memory_usage >= 0.0 && snapshot.memory_usage <= 100.0);
        assert!(snapshot.disk_usage >= 0.0 && snapshot.disk_usage <= 100.0);
        assert!(snapshot.cpu_usage >= 0.0);
    }

    #[test]
    fn test_platform_is_nonempty() {
        assert!(!MetricsSampler::platform().is_empty());
    }
}
