//! Host paths and binaries used by the networking components.

use std::path::PathBuf;

/// Default location of the `ip` binary.
pub const DEFAULT_IP_BINARY: &str = "/sbin/ip";

/// Default address-resolution cache export.
pub const DEFAULT_ARP_TABLE: &str = "/proc/net/arp";

/// Default IPv4 forwarding control file.
pub const DEFAULT_IP_FORWARD: &str = "/proc/sys/net/ipv4/ip_forward";

/// Networking configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `ip` binary used for device configuration and route listing.
    pub ip_binary: String,

    /// Address-resolution cache export.
    pub arp_table_path: PathBuf,

    /// IPv4 forwarding control file.
    pub ip_forward_path: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip_binary: DEFAULT_IP_BINARY.to_string(),
            arp_table_path: PathBuf::from(DEFAULT_ARP_TABLE),
            ip_forward_path: PathBuf::from(DEFAULT_IP_FORWARD),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            ip_binary: lookup("TAPNET_IP_BIN").unwrap_or(defaults.ip_binary),
            arp_table_path: lookup("TAPNET_ARP_TABLE")
                .map(PathBuf::from)
                .unwrap_or(defaults.arp_table_path),
            ip_forward_path: lookup("TAPNET_IP_FORWARD")
                .map(PathBuf::from)
                .unwrap_or(defaults.ip_forward_path),
            log_level: lookup("TAPNET_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}
