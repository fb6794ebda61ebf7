//! Turns raw kernel counters into dashboard metrics.
//!
//! The `Collector` reads `/proc` and `/sys` through a [`FileSystem`] and keeps
//! the previous CPU and network counters so it can report percentages and
//! rates. Each metric has its own method; deciding which failures are fatal
//! is left to the provider.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::collector::addresses::AddressLookup;
use crate::collector::procfs::parser::{
    parse_cpu_stat, parse_hardware_address, parse_hostname, parse_loadavg, parse_meminfo,
    parse_net_dev, parse_uptime,
};
use crate::collector::procfs::{CpuStat, NetDevStats, ParseError};
use crate::collector::traits::FileSystem;
use crate::model::{
    Connectivity, CpuUsage, LinkState, LoadAverage, MemoryUsage, NetworkInterfaceStat,
    OverlayStatus,
};

/// Errors raised while reading a single metric source.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Overlay network whose state is reported in the connectivity row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySettings {
    pub network_id: String,
    /// Interfaces whose name starts with this prefix belong to the overlay.
    pub interface_prefix: String,
}

/// Collects host metrics from `/proc` and `/sys`.
pub struct Collector<F: FileSystem, A: AddressLookup> {
    fs: F,
    addresses: A,
    proc_path: String,
    sys_path: String,
    overlay: Option<OverlaySettings>,
    prev_cpu: Vec<CpuStat>,
    prev_net: HashMap<String, NetDevStats>,
    prev_net_at: Option<Instant>,
    /// Interfaces whose missing hardware address was already reported.
    missing_hw_reported: HashSet<String>,
}

impl<F: FileSystem, A: AddressLookup> Collector<F, A> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `addresses` - IPv4 address source
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, addresses: A, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            addresses,
            proc_path: proc_path.into(),
            sys_path: "/sys".to_string(),
            overlay: None,
            prev_cpu: Vec::new(),
            prev_net: HashMap::new(),
            prev_net_at: None,
            missing_hw_reported: HashSet::new(),
        }
    }

    /// Overrides the sysfs root used for hardware address lookups.
    pub fn with_sys_path(mut self, sys_path: impl Into<String>) -> Self {
        self.sys_path = sys_path.into();
        self
    }

    /// Enables overlay network state reporting.
    pub fn with_overlay(mut self, overlay: OverlaySettings) -> Self {
        self.overlay = Some(overlay);
        self
    }

    fn read(&self, path: &Path) -> Result<String, CollectError> {
        self.fs
            .read_to_string(path)
            .map_err(|source| CollectError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    fn read_parsed<T>(
        &self,
        relative: &str,
        parse: impl FnOnce(&str) -> Result<T, ParseError>,
    ) -> Result<T, CollectError> {
        let path = PathBuf::from(format!("{}/{}", self.proc_path, relative));
        let content = self.read(&path)?;
        parse(&content).map_err(|source| CollectError::Parse { path, source })
    }

    /// Reads the hostname from `/proc/sys/kernel/hostname`.
    pub fn collect_hostname(&self) -> Result<String, CollectError> {
        self.read_parsed("sys/kernel/hostname", parse_hostname)
    }

    /// Collects memory totals from `/proc/meminfo`.
    pub fn collect_memory(&self) -> Result<MemoryUsage, CollectError> {
        let info = self.read_parsed("meminfo", parse_meminfo)?;
        Ok(MemoryUsage {
            total_kb: info.mem_total,
            used_kb: info.used(),
        })
    }

    /// Collects load average from `/proc/loadavg`.
    pub fn collect_loadavg(&self) -> Result<LoadAverage, CollectError> {
        let info = self.read_parsed("loadavg", parse_loadavg)?;
        Ok(LoadAverage {
            one: info.load1,
            five: info.load5,
            fifteen: info.load15,
        })
    }

    /// Collects time since boot from `/proc/uptime`.
    pub fn collect_uptime(&self) -> Result<Duration, CollectError> {
        let secs = self.read_parsed("uptime", parse_uptime)?;
        Ok(Duration::from_secs_f64(secs))
    }

    /// Collects CPU usage since the previous call from `/proc/stat`.
    ///
    /// The first call only records a baseline and reports 0% everywhere.
    pub fn collect_cpu(&mut self) -> Result<CpuUsage, CollectError> {
        let current = self.read_parsed("stat", parse_cpu_stat)?;
        let usage = cpu_usage(&self.prev_cpu, &current);
        self.prev_cpu = current;
        Ok(usage)
    }

    /// Collects per-interface throughput from `/proc/net/dev`.
    ///
    /// Rates are computed against the previous call; the first call, a new
    /// interface, or a counter reset reports zero.
    pub fn collect_network(
        &mut self,
        now: Instant,
    ) -> Result<Vec<NetworkInterfaceStat>, CollectError> {
        let devices = self.read_parsed("net/dev", parse_net_dev)?;

        let elapsed = self
            .prev_net_at
            .map(|prev| now.saturating_duration_since(prev).as_secs_f64())
            .unwrap_or(0.0);

        let addresses = self.addresses.ipv4_addresses();

        let mut interfaces = Vec::with_capacity(devices.len());
        for dev in &devices {
            let (download, upload) = match self.prev_net.get(&dev.interface) {
                Some(prev) => (
                    counter_rate(dev.rx_bytes, prev.rx_bytes, elapsed),
                    counter_rate(dev.tx_bytes, prev.tx_bytes, elapsed),
                ),
                None => (0.0, 0.0),
            };
            interfaces.push(NetworkInterfaceStat {
                name: dev.interface.clone(),
                ip_address: addresses.get(&dev.interface).cloned().unwrap_or_default(),
                hardware_address: self.hardware_address(&dev.interface),
                upload_bytes_per_sec: upload,
                download_bytes_per_sec: download,
            });
        }

        self.prev_net = devices
            .into_iter()
            .map(|dev| (dev.interface.clone(), dev))
            .collect();
        self.prev_net_at = Some(now);

        Ok(interfaces)
    }

    /// Records CPU and network baselines so the next sample carries deltas.
    ///
    /// Failures are logged and leave the baseline empty.
    pub fn prime(&mut self, now: Instant) {
        if let Err(e) = self.collect_cpu() {
            warn!(error = %e, "failed to prime cpu baseline");
        }
        if let Err(e) = self.collect_network(now) {
            warn!(error = %e, "failed to prime network baseline");
        }
    }

    /// Derives link states from the sampled interfaces.
    pub fn connectivity(&self, interfaces: &[NetworkInterfaceStat]) -> Connectivity {
        connectivity(interfaces, self.overlay.as_ref())
    }

    fn hardware_address(&mut self, interface: &str) -> Option<String> {
        let path = PathBuf::from(format!("{}/class/net/{}/address", self.sys_path, interface));
        match self.fs.read_to_string(&path) {
            Ok(content) => parse_hardware_address(&content),
            Err(e) => {
                if self.missing_hw_reported.insert(interface.to_string()) {
                    warn!(interface, path = %path.display(), error = %e, "hardware address unavailable");
                } else {
                    debug!(interface, error = %e, "hardware address still unavailable");
                }
                None
            }
        }
    }
}

/// Per-line CPU usage between two `/proc/stat` samples.
///
/// Lines are matched by cpu id; lines without a previous sample report 0.
pub fn cpu_usage(prev: &[CpuStat], current: &[CpuStat]) -> CpuUsage {
    let percent_for = |cpu: &CpuStat| -> u8 {
        prev.iter()
            .find(|p| p.cpu_id == cpu.cpu_id)
            .map(|p| busy_percent(p, cpu))
            .unwrap_or(0)
    };

    let aggregate = current
        .iter()
        .find(|cpu| cpu.cpu_id.is_none())
        .map(percent_for)
        .unwrap_or(0);

    let per_core = current
        .iter()
        .filter(|cpu| cpu.cpu_id.is_some())
        .map(percent_for)
        .collect();

    CpuUsage {
        count: current.len(),
        aggregate,
        per_core,
    }
}

fn busy_percent(prev: &CpuStat, current: &CpuStat) -> u8 {
    let (Some(total), Some(idle)) = (
        current.total().checked_sub(prev.total()),
        current.idle_total().checked_sub(prev.idle_total()),
    ) else {
        return 0;
    };
    if total == 0 {
        return 0;
    }
    let busy = total.saturating_sub(idle) as f64;
    (busy / total as f64 * 100.0).round().min(100.0) as u8
}

/// Bytes per second between two counter readings, 0 on reset or zero interval.
fn counter_rate(current: u64, prev: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    current
        .checked_sub(prev)
        .map(|delta| delta as f64 / elapsed_secs)
        .unwrap_or(0.0)
}

fn connectivity(
    interfaces: &[NetworkInterfaceStat],
    overlay: Option<&OverlaySettings>,
) -> Connectivity {
    let internet = if interfaces
        .iter()
        .any(|iface| !iface.is_loopback() && !iface.ip_address.is_empty())
    {
        LinkState::Connected
    } else {
        LinkState::Offline
    };

    let overlay = overlay
        .filter(|settings| !settings.network_id.is_empty())
        .map(|settings| {
            let joined = interfaces.iter().any(|iface| {
                iface.name.starts_with(&settings.interface_prefix) && !iface.ip_address.is_empty()
            });
            OverlayStatus {
                network_id: settings.network_id.clone(),
                state: if joined {
                    LinkState::Connected
                } else {
                    LinkState::Connecting
                },
            }
        });

    Connectivity { internet, overlay }
}
