//! zspash - live terminal dashboard for a node's vital signs.
//!
//! The library holds everything the `zspash` binary is built from:
//! - `model` - the per-frame `Snapshot`
//! - `collector` - reads `/proc` and `/sys` into metrics
//! - `provider` - turns collection into one consistent snapshot per frame
//! - `tui` - layout, drawing surfaces and the refresh loop
//! - `config` - TOML configuration

pub mod collector;
pub mod config;
pub mod model;
pub mod provider;
pub mod tui;
