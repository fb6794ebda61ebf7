//! Inter-frame waiting and shutdown signalling.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

/// Cancellation token shared between the refresh loop and signal handlers.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Waits between frames.
pub trait Pacer {
    /// Blocks for up to `interval`, returning early once `shutdown` is requested.
    fn wait(&mut self, interval: Duration, shutdown: &Shutdown) -> io::Result<()>;
}

/// Plain sleep, checking the token every `slice`.
#[derive(Debug, Clone)]
pub struct SleepPacer {
    slice: Duration,
}

impl SleepPacer {
    pub fn new(slice: Duration) -> Self {
        Self { slice }
    }
}

impl Default for SleepPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

impl Pacer for SleepPacer {
    fn wait(&mut self, interval: Duration, shutdown: &Shutdown) -> io::Result<()> {
        let deadline = Instant::now() + interval;
        loop {
            if shutdown.is_requested() {
                return Ok(());
            }
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Ok(());
            }
            thread::sleep(left.min(self.slice));
        }
    }
}

/// Waits by polling terminal input until the deadline.
///
/// Raw mode swallows SIGINT, so Ctrl-C arrives as a key event and is turned
/// into a shutdown request here. Other input is ignored; a resize is picked
/// up by the surface on the next frame.
#[derive(Debug, Clone)]
pub struct TerminalPacer {
    slice: Duration,
}

impl TerminalPacer {
    pub fn new() -> Self {
        Self {
            slice: Duration::from_millis(100),
        }
    }
}

impl Default for TerminalPacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer for TerminalPacer {
    fn wait(&mut self, interval: Duration, shutdown: &Shutdown) -> io::Result<()> {
        let deadline = Instant::now() + interval;
        loop {
            if shutdown.is_requested() {
                return Ok(());
            }
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Ok(());
            }
            if event::poll(left.min(self.slice))? {
                match event::read()? {
                    Event::Key(key) if is_interrupt(&key) => {
                        info!("interrupt key pressed");
                        shutdown.request();
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "resize event");
                    }
                    _ => {}
                }
            }
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c'))
}
