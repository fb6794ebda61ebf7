//! Scripted provider that replays a fixed sequence of outcomes.

use std::collections::VecDeque;

use crate::model::Snapshot;

use super::{ProviderError, SnapshotProvider};

/// Provider that yields queued snapshots or errors in order.
///
/// Used to drive the refresh loop deterministically. Once the queue is
/// drained every call returns [`ProviderError::Exhausted`].
#[derive(Debug, Default)]
pub struct ReplayProvider {
    queue: VecDeque<Result<Snapshot, ProviderError>>,
    served: usize,
}

impl ReplayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider from successful snapshots.
    pub fn from_snapshots(snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        Self {
            queue: snapshots.into_iter().map(Ok).collect(),
            served: 0,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.queue.push_back(Ok(snapshot));
    }

    pub fn push_error(&mut self, error: ProviderError) {
        self.queue.push_back(Err(error));
    }

    /// Number of `advance` calls answered so far, including errors.
    pub fn served(&self) -> usize {
        self.served
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl SnapshotProvider for ReplayProvider {
    fn advance(&mut self) -> Result<Snapshot, ProviderError> {
        self.served += 1;
        self.queue.pop_front().unwrap_or(Err(ProviderError::Exhausted))
    }
}
