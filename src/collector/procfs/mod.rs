//! Parsers for the Linux `/proc` and `/sys` filesystems.

pub mod parser;

pub use parser::{CpuStat, NetDevStats, ParseError};
