//! Provider abstraction for snapshot data sources.
//!
//! This module defines the `SnapshotProvider` trait that lets the refresh
//! loop work with different data sources through a unified interface:
//! live collection from the host, or a scripted sequence in tests.

mod live;
mod replay;

pub use live::LiveProvider;
pub use replay::ReplayProvider;

use std::fmt;

use crate::collector::CollectError;
use crate::model::Snapshot;

/// Metrics whose absence aborts the refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Hostname,
    Memory,
    LoadAverage,
    Uptime,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Hostname => "hostname",
            Metric::Memory => "memory",
            Metric::LoadAverage => "load average",
            Metric::Uptime => "uptime",
        };
        f.write_str(name)
    }
}

/// Error types that can occur while acquiring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A required metric could not be sampled.
    #[error("{metric} unavailable: {source}")]
    Unavailable {
        metric: Metric,
        #[source]
        source: CollectError,
    },
    /// A scripted provider ran out of snapshots.
    #[error("no more snapshots")]
    Exhausted,
}

impl ProviderError {
    pub(crate) fn unavailable(metric: Metric) -> impl FnOnce(CollectError) -> Self {
        move |source| ProviderError::Unavailable { metric, source }
    }
}

/// Abstraction for snapshot data sources.
///
/// Acquisition is all-or-nothing: either a complete `Snapshot` for this
/// instant is returned, or an error and no partial data.
pub trait SnapshotProvider {
    /// Acquires the next snapshot.
    fn advance(&mut self) -> Result<Snapshot, ProviderError>;

    /// Returns `true` if this provider samples the live host.
    fn is_live(&self) -> bool {
        false
    }
}

impl<P: SnapshotProvider + ?Sized> SnapshotProvider for Box<P> {
    fn advance(&mut self) -> Result<Snapshot, ProviderError> {
        (**self).advance()
    }

    fn is_live(&self) -> bool {
        (**self).is_live()
    }
}
