//! Pre-built mock host scenarios for testing.

use super::filesystem::MockFs;

/// `/proc/net/dev` header lines; the parser skips them.
pub(crate) const NET_DEV_HEADER: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
";

impl MockFs {
    /// A four-core host with loopback, one uplink and one overlay interface.
    pub fn typical_host() -> Self {
        let fs = Self::new();

        fs.add_file("/proc/sys/kernel/hostname", "zos-node-01\n");
        fs.add_file("/proc/uptime", "273845.12 1043561.90\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );
        fs.add_file(
            "/proc/net/dev",
            format!(
                "{}{}",
                NET_DEV_HEADER,
                "\
    lo: 12345678     9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: 987654321   654321    5   10    0     0          0       100 123456789   456789    2    5    0     0       0          0
   zt0:  4567890     3456    0    0    0     0          0         0  2345678     2345    0    0    0     0       0          0
"
            ),
        );

        fs.add_interface_address("/sys", "lo", "00:00:00:00:00:00");
        fs.add_interface_address("/sys", "eth0", "52:54:00:a1:b2:c3");
        fs.add_interface_address("/sys", "zt0", "f6:2e:91:0a:44:7d");

        fs
    }

    /// A host whose kernel reports no network interfaces at all.
    pub fn host_without_network() -> Self {
        let fs = Self::typical_host();
        fs.add_file("/proc/net/dev", NET_DEV_HEADER);
        fs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::traits::FileSystem;
    use std::path::Path;

    #[test]
    fn test_typical_host_has_required_files() {
        let fs = MockFs::typical_host();

        assert!(fs.contains("/proc/meminfo"));
        assert!(fs.contains("/proc/stat"));
        assert!(fs.contains("/proc/loadavg"));
        assert!(fs.contains("/proc/uptime"));
        assert!(fs.contains("/proc/net/dev"));
        assert!(fs.contains("/proc/sys/kernel/hostname"));
        assert!(fs.contains("/sys/class/net/eth0/address"));
    }

    #[test]
    fn test_host_without_network_has_only_header() {
        let fs = MockFs::host_without_network();
        let content = fs.read_to_string(Path::new("/proc/net/dev")).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
