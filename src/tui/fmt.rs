//! Field formatting table.
//!
//! Every variable value on the dashboard is rendered through a [`Field`],
//! which carries its width, alignment, precision and padding character.
//! Output is locale-independent fixed-point.

use std::time::Duration;

use crate::model::{MemoryUsage, NetworkInterfaceStat, WallClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Width, alignment, precision and padding of a rendered value.
///
/// `width` is a minimum: longer values are never truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFormat {
    pub width: usize,
    pub align: Align,
    pub precision: Option<usize>,
    pub pad: char,
}

impl FieldFormat {
    pub const fn plain() -> Self {
        Self {
            width: 0,
            align: Align::Left,
            precision: None,
            pad: ' ',
        }
    }
}

/// Formatted values shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// One of hours, minutes or seconds.
    ClockPart,
    LoadAverage,
    CpuPercent,
    RamPercent,
    InterfaceName,
    IpAddress,
    /// Combined interface throughput in KB/s.
    Throughput,
    Count,
}

impl Field {
    pub const fn format(self) -> FieldFormat {
        let plain = FieldFormat::plain();
        match self {
            Field::ClockPart => FieldFormat {
                width: 2,
                align: Align::Right,
                pad: '0',
                ..plain
            },
            Field::LoadAverage | Field::Throughput => FieldFormat {
                precision: Some(2),
                ..plain
            },
            Field::CpuPercent | Field::RamPercent => FieldFormat {
                width: 3,
                align: Align::Right,
                ..plain
            },
            Field::InterfaceName | Field::IpAddress => FieldFormat {
                width: 15,
                ..plain
            },
            Field::Count => plain,
        }
    }

    pub fn text(self, value: &str) -> String {
        pad(value, self.format())
    }

    /// Formats a float, rounding to the field precision (or to an integer).
    pub fn float(self, value: f64) -> String {
        let fmt = self.format();
        let value = if value.is_finite() { value } else { 0.0 };
        let text = match fmt.precision {
            Some(precision) => format!("{:.*}", precision, value),
            None => format!("{:.0}", value),
        };
        pad(&text, fmt)
    }

    pub fn int(self, value: u64) -> String {
        pad(&value.to_string(), self.format())
    }
}

/// Pads `text` to the format width; never truncates.
pub fn pad(text: &str, fmt: FieldFormat) -> String {
    let len = text.chars().count();
    if len >= fmt.width {
        return text.to_string();
    }
    let fill: String = std::iter::repeat_n(fmt.pad, fmt.width - len).collect();
    match fmt.align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

/// `HH:MM:SS`, zero-padded.
pub fn clock(time: WallClock) -> String {
    format!(
        "{}:{}:{}",
        Field::ClockPart.int(time.hour.into()),
        Field::ClockPart.int(time.minute.into()),
        Field::ClockPart.int(time.second.into())
    )
}

/// Aggregate CPU usage, e.g. `  5%`.
pub fn cpu_percent(percent: u8) -> String {
    format!("{}%", Field::CpuPercent.int(percent.into()))
}

/// RAM usage with absolute megabytes, e.g. ` 25% (4285 MB)`.
pub fn ram_usage(memory: &MemoryUsage) -> String {
    format!(
        "{}% ({} MB)",
        Field::RamPercent.int(memory.percent_used()),
        memory.used_mb()
    )
}

/// Combined throughput, e.g. `2.00 KB/s`.
pub fn throughput(iface: &NetworkInterfaceStat) -> String {
    format!("{} KB/s", Field::Throughput.float(iface.combined_kbps()))
}

/// Format uptime to a compact human-readable form.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_alignment() {
        let right = FieldFormat {
            width: 5,
            align: Align::Right,
            precision: None,
            pad: '*',
        };
        assert_eq!(pad("ab", right), "***ab");
        assert_eq!(
            pad(
                "ab",
                FieldFormat {
                    align: Align::Left,
                    ..right
                }
            ),
            "ab***"
        );
        assert_eq!(pad("abcdefg", right), "abcdefg");
    }

    #[test]
    fn test_clock_zero_padded() {
        assert_eq!(clock(WallClock::new(9, 5, 0)), "09:05:00");
        assert_eq!(clock(WallClock::new(23, 59, 59)), "23:59:59");
    }

    #[test]
    fn test_load_average_two_decimals() {
        assert_eq!(Field::LoadAverage.float(1.234), "1.23");
        assert_eq!(Field::LoadAverage.float(0.0), "0.00");
        assert_eq!(Field::LoadAverage.float(12.5), "12.50");
        assert_eq!(Field::LoadAverage.float(f64::NAN), "0.00");
    }

    #[test]
    fn test_percentages_right_justified() {
        assert_eq!(cpu_percent(5), "  5%");
        assert_eq!(cpu_percent(100), "100%");

        let mem = MemoryUsage {
            total_kb: 1024 * 1024,
            used_kb: 256 * 1024,
        };
        assert_eq!(ram_usage(&mem), " 25% (256 MB)");
    }

    #[test]
    fn test_zero_memory_is_zero_percent() {
        assert_eq!(ram_usage(&MemoryUsage::default()), "  0% (0 MB)");
    }

    #[test]
    fn test_interface_columns() {
        assert_eq!(Field::InterfaceName.text("eth0"), "eth0           ");
        assert_eq!(Field::IpAddress.text("10.0.0.1").len(), 15);
        assert_eq!(
            Field::InterfaceName.text("a-very-long-bridge-name"),
            "a-very-long-bridge-name"
        );
    }

    #[test]
    fn test_throughput() {
        let iface = NetworkInterfaceStat {
            upload_bytes_per_sec: 2048.0,
            download_bytes_per_sec: 0.0,
            ..NetworkInterfaceStat::default()
        };
        assert_eq!(throughput(&iface), "2.00 KB/s");
        assert_eq!(throughput(&NetworkInterfaceStat::default()), "0.00 KB/s");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(42)), "42s");
        assert_eq!(format_uptime(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_uptime(Duration::from_secs(7260)), "2h 1m");
        assert_eq!(format_uptime(Duration::from_secs(273845)), "3d 4h");
    }
}
