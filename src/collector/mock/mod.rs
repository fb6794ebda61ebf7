//! Mock filesystem implementations for testing.
//!
//! This module provides `MockFs` and pre-built host scenarios for running
//! the collector without access to a real Linux `/proc` and `/sys`.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
#[cfg(test)]
pub(crate) use scenarios::NET_DEV_HEADER;
