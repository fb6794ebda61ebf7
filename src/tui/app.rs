//! Refresh loop.

use std::io;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::provider::{ProviderError, SnapshotProvider};

use super::event::{Pacer, Shutdown};
use super::layout::Layout;
use super::surface::Surface;

/// Fatal refresh loop errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("sampling failed: {0}")]
    Sample(#[from] ProviderError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Dashboard application: sample, paint, present, wait.
pub struct App<P, S, W> {
    provider: P,
    surface: S,
    pacer: W,
    layout: Layout,
    interval: Duration,
    shutdown: Shutdown,
}

impl<P, S, W> App<P, S, W>
where
    P: SnapshotProvider,
    S: Surface,
    W: Pacer,
{
    pub fn new(provider: P, surface: S, pacer: W, layout: Layout, interval: Duration) -> Self {
        Self {
            provider,
            surface,
            pacer,
            layout,
            interval,
            shutdown: Shutdown::new(),
        }
    }

    /// Uses an externally owned cancellation token.
    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Runs until shutdown is requested.
    ///
    /// The first frame is drawn before any wait. Returns the number of
    /// frames presented, or the first fatal error; a failed sample leaves
    /// the previously presented frame on screen.
    pub fn run(&mut self) -> Result<usize, AppError> {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            live = self.provider.is_live(),
            "refresh loop started"
        );

        let mut frames = 0;
        self.cycle()?;
        frames += 1;

        loop {
            self.pacer.wait(self.interval, &self.shutdown)?;
            if self.shutdown.is_requested() {
                break;
            }
            self.cycle()?;
            frames += 1;
        }

        info!(frames, "refresh loop stopped");
        Ok(frames)
    }

    fn cycle(&mut self) -> Result<(), AppError> {
        let started = Instant::now();

        let snapshot = self.provider.advance().inspect_err(|e| {
            error!(error = %e, "snapshot failed");
        })?;

        self.surface.prepare()?;
        self.layout.paint(&mut self.surface, &snapshot);
        self.surface.present()?;

        debug!(
            elapsed_us = started.elapsed().as_micros() as u64,
            "frame presented"
        );
        Ok(())
    }
}
