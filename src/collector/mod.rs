//! Host metrics collector for Linux.
//!
//! This module reads `/proc` and `/sys` through the `FileSystem` trait so the
//! same code runs against the real kernel or an in-memory mock.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  Collector                   │
//! │  /proc/stat  /proc/meminfo  /proc/loadavg    │
//! │  /proc/uptime  /proc/net/dev  /sys/class/net │
//! └───────────┬─────────────────────┬────────────┘
//!             │                     │
//!      ┌──────▼──────┐       ┌──────▼───────┐
//!      │ FileSystem  │       │ AddressLookup│ (traits)
//!      └──────┬──────┘       └──────┬───────┘
//!        ┌────┴────┐           ┌────┴─────┐
//!     RealFs    MockFs     Sysinfo    Static
//! ```
//!
//! # Usage
//!
//! ```
//! use zspash::collector::{Collector, MockFs, StaticAddresses};
//!
//! let fs = MockFs::typical_host();
//! let collector = Collector::new(fs, StaticAddresses::typical_host(), "/proc");
//! let memory = collector.collect_memory().unwrap();
//! assert!(memory.total_kb > 0);
//! ```

pub mod addresses;
#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use addresses::{AddressLookup, StaticAddresses, SysinfoAddresses};
pub use collector::{CollectError, Collector, OverlaySettings, cpu_usage};
pub use mock::MockFs;
pub use traits::{FileSystem, RealFs};
