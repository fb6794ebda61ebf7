//! Live data provider for real-time host monitoring.

use std::time::Instant;

use tracing::{debug, warn};

use crate::collector::traits::FileSystem;
use crate::collector::{AddressLookup, Collector};
use crate::model::{Snapshot, WallClock, WorkloadCounts};

use super::{Metric, ProviderError, SnapshotProvider};

/// Provider for real-time host data collection.
///
/// Memory, load average and uptime are required: if any of them cannot be
/// read the cycle fails. CPU and network failures are logged and the cycle
/// continues with empty values.
pub struct LiveProvider<F: FileSystem, A: AddressLookup> {
    collector: Collector<F, A>,
    hostname: String,
    workloads: WorkloadCounts,
}

impl<F: FileSystem, A: AddressLookup> LiveProvider<F, A> {
    /// Initializes the provider.
    ///
    /// Reads the hostname and records CPU/network baselines so the first
    /// snapshot already carries deltas.
    pub fn initialize(mut collector: Collector<F, A>) -> Result<Self, ProviderError> {
        let hostname = collector
            .collect_hostname()
            .map_err(ProviderError::unavailable(Metric::Hostname))?;
        collector.prime(Instant::now());

        Ok(Self {
            collector,
            hostname,
            workloads: WorkloadCounts::default(),
        })
    }

    /// Samples every metric as of `now`.
    pub fn sample_at(&mut self, now: Instant, time: WallClock) -> Result<Snapshot, ProviderError> {
        let started = Instant::now();

        let cpu = self.collector.collect_cpu().unwrap_or_else(|e| {
            warn!(error = %e, "cpu sample failed");
            Default::default()
        });

        let interfaces = self.collector.collect_network(now).unwrap_or_else(|e| {
            warn!(error = %e, "network sample failed");
            Vec::new()
        });

        let memory = self
            .collector
            .collect_memory()
            .map_err(ProviderError::unavailable(Metric::Memory))?;
        let load = self
            .collector
            .collect_loadavg()
            .map_err(ProviderError::unavailable(Metric::LoadAverage))?;
        let uptime = self
            .collector
            .collect_uptime()
            .map_err(ProviderError::unavailable(Metric::Uptime))?;

        let connectivity = self.collector.connectivity(&interfaces);

        debug!(
            elapsed_us = started.elapsed().as_micros() as u64,
            interfaces = interfaces.len(),
            "snapshot collected"
        );

        Ok(Snapshot {
            hostname: self.hostname.clone(),
            cpu,
            memory,
            load,
            uptime,
            interfaces,
            connectivity,
            workloads: self.workloads,
            time,
        })
    }
}

impl<F: FileSystem, A: AddressLookup> SnapshotProvider for LiveProvider<F, A> {
    fn advance(&mut self) -> Result<Snapshot, ProviderError> {
        self.sample_at(Instant::now(), WallClock::now())
    }

    fn is_live(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{MockFs, OverlaySettings, StaticAddresses};
    use crate::model::LinkState;
    use std::time::Duration;

    fn provider(fs: MockFs) -> LiveProvider<MockFs, StaticAddresses> {
        let collector = Collector::new(fs, StaticAddresses::typical_host(), "/proc").with_overlay(
            OverlaySettings {
                network_id: "ab12cd34".to_string(),
                interface_prefix: "zt".to_string(),
            },
        );
        LiveProvider::initialize(collector).unwrap()
    }

    #[test]
    fn test_live_provider_advance() {
        let mut provider = provider(MockFs::typical_host());
        assert!(provider.is_live());

        let snapshot = provider
            .sample_at(Instant::now(), WallClock::new(12, 30, 5))
            .unwrap();
        assert_eq!(snapshot.hostname, "zos-node-01");
        assert_eq!(snapshot.cpu.count, 5);
        assert_eq!(snapshot.cpu.core_count(), 4);
        assert_eq!(snapshot.memory.total_kb, 16384000);
        assert_eq!(snapshot.interfaces.len(), 3);
        assert_eq!(snapshot.time, WallClock::new(12, 30, 5));
        assert_eq!(snapshot.uptime, Duration::from_secs_f64(273845.12));
        assert_eq!(snapshot.connectivity.internet, LinkState::Connected);
        assert_eq!(
            snapshot.connectivity.overlay.map(|o| o.state),
            Some(LinkState::Connected)
        );
        assert_eq!(snapshot.workloads, WorkloadCounts::default());
    }

    #[test]
    fn test_missing_hostname_fails_initialization() {
        let fs = MockFs::typical_host();
        fs.remove_file("/proc/sys/kernel/hostname");
        let collector = Collector::new(fs, StaticAddresses::new(), "/proc");

        let err = LiveProvider::initialize(collector).err().unwrap();
        assert!(matches!(
            err,
            ProviderError::Unavailable {
                metric: Metric::Hostname,
                ..
            }
        ));
    }

    #[test]
    fn test_required_metrics_are_fatal() {
        for (file, metric) in [
            ("/proc/meminfo", Metric::Memory),
            ("/proc/loadavg", Metric::LoadAverage),
            ("/proc/uptime", Metric::Uptime),
        ] {
            let fs = MockFs::typical_host();
            let mut provider = provider(fs.clone());
            fs.remove_file(file);

            match provider.advance() {
                Err(ProviderError::Unavailable { metric: m, .. }) => assert_eq!(m, metric),
                other => panic!("{}: unexpected {:?}", file, other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_cpu_and_network_failures_degrade() {
        let fs = MockFs::typical_host();
        let mut provider = provider(fs.clone());
        fs.remove_file("/proc/stat");
        fs.remove_file("/proc/net/dev");

        let snapshot = provider.advance().unwrap();
        assert_eq!(snapshot.cpu.count, 0);
        assert!(snapshot.interfaces.is_empty());
        assert_eq!(snapshot.connectivity.internet, LinkState::Offline);
    }

    #[test]
    fn test_host_without_interfaces() {
        let mut provider = provider(MockFs::host_without_network());
        let snapshot = provider.advance().unwrap();
        assert!(snapshot.interfaces.is_empty());
        assert_eq!(snapshot.connectivity.internet, LinkState::Offline);
        assert_eq!(
            snapshot.connectivity.overlay.map(|o| o.state),
            Some(LinkState::Connecting)
        );
    }

    #[test]
    fn test_error_message_names_metric() {
        let fs = MockFs::typical_host();
        let mut provider = provider(fs.clone());
        fs.remove_file("/proc/loadavg");

        let msg = provider.advance().err().unwrap().to_string();
        assert!(msg.starts_with("load average unavailable"), "{}", msg);
        assert!(msg.contains("/proc/loadavg"), "{}", msg);
    }
}
