//! Interface address lookup.
//!
//! IPv4 addresses are not exposed in a simple `/proc` file, so they come from
//! `sysinfo` on a live host and from a fixed table in tests.

use std::collections::HashMap;

use sysinfo::Networks;

/// Resolves interface names to their first IPv4 address.
pub trait AddressLookup {
    /// Returns a map from interface name to its first IPv4 address.
    ///
    /// Interfaces without an IPv4 address are absent from the map.
    fn ipv4_addresses(&mut self) -> HashMap<String, String>;
}

/// Live lookup backed by `sysinfo`.
#[derive(Debug, Default)]
pub struct SysinfoAddresses;

impl SysinfoAddresses {
    pub fn new() -> Self {
        Self
    }
}

impl AddressLookup for SysinfoAddresses {
    fn ipv4_addresses(&mut self) -> HashMap<String, String> {
        // Refreshing the list also re-reads addresses of hot-plugged interfaces.
        let networks = Networks::new_with_refreshed_list();
        networks
            .list()
            .iter()
            .filter_map(|(name, data)| {
                data.ip_networks()
                    .iter()
                    .find(|net| net.addr.is_ipv4())
                    .map(|net| (name.clone(), net.addr.to_string()))
            })
            .collect()
    }
}

/// Fixed address table, used with `MockFs` hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticAddresses {
    addresses: HashMap<String, String>,
}

impl StaticAddresses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, interface: &str, address: &str) -> Self {
        self.addresses
            .insert(interface.to_string(), address.to_string());
        self
    }

    /// Addresses matching `MockFs::typical_host`.
    pub fn typical_host() -> Self {
        Self::new()
            .with("lo", "127.0.0.1")
            .with("eth0", "10.20.30.40")
            .with("zt0", "172.23.8.1")
    }
}

impl AddressLookup for StaticAddresses {
    fn ipv4_addresses(&mut self) -> HashMap<String, String> {
        self.addresses.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_addresses() {
        let mut lookup = StaticAddresses::new().with("eth0", "192.168.1.10");
        let map = lookup.ipv4_addresses();
        assert_eq!(map.get("eth0").map(String::as_str), Some("192.168.1.10"));
        assert!(!map.contains_key("lo"));
    }

    #[test]
    fn test_sysinfo_addresses_are_ipv4() {
        let mut lookup = SysinfoAddresses::new();
        for addr in lookup.ipv4_addresses().values() {
            assert!(addr.parse::<std::net::Ipv4Addr>().is_ok(), "{}", addr);
        }
    }
}
