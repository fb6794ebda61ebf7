//! Data model shared between the collector and the dashboard renderer.

mod snapshot;

pub use snapshot::{
    Connectivity, CpuUsage, LinkState, LoadAverage, MemoryUsage, NetworkInterfaceStat,
    OverlayStatus, Snapshot, WallClock, WorkloadCounts,
};
