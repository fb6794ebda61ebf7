//! Point-in-time host metrics consumed by the layout engine.
//!
//! A [`Snapshot`] is built fresh every refresh cycle and dropped once the
//! frame has been painted. Nothing in here knows how it is rendered.

use std::time::Duration;

use chrono::Timelike;

/// One consistent bundle of all metrics for a render cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub hostname: String,
    pub cpu: CpuUsage,
    pub memory: MemoryUsage,
    pub load: LoadAverage,
    pub uptime: Duration,
    /// Interfaces in kernel order. The count may change between cycles.
    pub interfaces: Vec<NetworkInterfaceStat>,
    pub connectivity: Connectivity,
    pub workloads: WorkloadCounts,
    pub time: WallClock,
}

/// CPU utilisation derived from two consecutive `/proc/stat` samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuUsage {
    /// Raw number of `cpu*` lines, including the aggregate `cpu` line.
    pub count: usize,
    /// Aggregate usage, 0..=100.
    pub aggregate: u8,
    /// Per-core usage in core order, 0..=100.
    pub per_core: Vec<u8>,
}

impl CpuUsage {
    /// Number of real cores: the raw count minus the aggregate slot.
    pub fn core_count(&self) -> usize {
        self.count.saturating_sub(1)
    }
}

/// Memory totals in kilobytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryUsage {
    pub total_kb: u64,
    pub used_kb: u64,
}

impl MemoryUsage {
    /// Used memory as a rounded percentage. A zero total yields 0.
    pub fn percent_used(&self) -> u64 {
        if self.total_kb == 0 {
            return 0;
        }
        (self.used_kb as f64 / self.total_kb as f64 * 100.0).round() as u64
    }

    pub fn total_gb(&self) -> u64 {
        self.total_kb / (1024 * 1024)
    }

    pub fn used_mb(&self) -> u64 {
        self.used_kb / 1024
    }
}

/// 1, 5 and 15 minute load averages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

impl LoadAverage {
    pub fn as_array(&self) -> [f64; 3] {
        [self.one, self.five, self.fifteen]
    }
}

/// Per-interface network statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkInterfaceStat {
    pub name: String,
    /// First IPv4 address, empty when the interface has none.
    pub ip_address: String,
    /// Contents of `/sys/class/net/<name>/address`, `None` if unreadable.
    pub hardware_address: Option<String>,
    pub upload_bytes_per_sec: f64,
    pub download_bytes_per_sec: f64,
}

impl NetworkInterfaceStat {
    /// Combined upload + download throughput in KB/s.
    pub fn combined_kbps(&self) -> f64 {
        (self.upload_bytes_per_sec + self.download_bytes_per_sec) / 1024.0
    }

    pub fn is_loopback(&self) -> bool {
        self.name == "lo"
    }
}

/// Reachability state shown in the network panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkState {
    Connected,
    Connecting,
    #[default]
    Offline,
}

impl LinkState {
    pub fn label(self) -> &'static str {
        match self {
            LinkState::Connected => "connected",
            LinkState::Connecting => "connecting",
            LinkState::Offline => "offline",
        }
    }
}

/// State of the configured overlay network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayStatus {
    pub network_id: String,
    pub state: LinkState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connectivity {
    pub internet: LinkState,
    /// `None` when no overlay network is configured.
    pub overlay: Option<OverlayStatus>,
}

/// Running workload counts. Always zero until an orchestrator feeds them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkloadCounts {
    pub containers: u32,
    pub virtual_machines: u32,
}

/// Local wall-clock time of the sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallClock {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallClock {
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Current local time of day.
    pub fn now() -> Self {
        Self::from_time(chrono::Local::now().time())
    }

    pub fn from_time(time: impl Timelike) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            // leap seconds are reported as 60
            second: time.second().min(59) as u8,
        }
    }
}
