//! Default route and default gateway discovery.
//!
//! The resolver reads the routing table and address-resolution cache through
//! a [`TableSource`], so callers can supply literal table snapshots instead of
//! the live kernel exports.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::command::CommandRunner;
use crate::error::NetworkError;
use crate::tables;
use crate::types::InterfaceInfo;

/// Provider of the raw routing and address-resolution text.
pub trait TableSource {
    /// Routing table in `ip route` text form.
    fn route_table(&self) -> Result<String, NetworkError>;

    /// Address-resolution cache in `/proc/net/arp` text form.
    fn arp_table(&self) -> Result<String, NetworkError>;
}

/// Reads the live tables: `<ip> route` output and the ARP export file.
#[derive(Debug, Clone)]
pub struct KernelTables<R> {
    runner: R,
    arp_path: PathBuf,
}

impl<R: CommandRunner> KernelTables<R> {
    pub fn new(runner: R, arp_path: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            arp_path: arp_path.into(),
        }
    }
}

impl<R: CommandRunner> TableSource for KernelTables<R> {
    fn route_table(&self) -> Result<String, NetworkError> {
        self.runner
            .run(&["route"])
            .map_err(|e| NetworkError::TableRead {
                source_name: "routing table".to_string(),
                source: std::io::Error::other(e),
            })
    }

    fn arp_table(&self) -> Result<String, NetworkError> {
        fs::read_to_string(&self.arp_path).map_err(|source| NetworkError::TableRead {
            source_name: self.arp_path.display().to_string(),
            source,
        })
    }
}

/// Fixed table text.
#[derive(Debug, Clone, Default)]
pub struct StaticTables {
    pub routes: String,
    pub arp: String,
}

impl StaticTables {
    pub fn new(routes: impl Into<String>, arp: impl Into<String>) -> Self {
        Self {
            routes: routes.into(),
            arp: arp.into(),
        }
    }
}

impl TableSource for StaticTables {
    fn route_table(&self) -> Result<String, NetworkError> {
        Ok(self.routes.clone())
    }

    fn arp_table(&self) -> Result<String, NetworkError> {
        Ok(self.arp.clone())
    }
}

/// Answers "which device carries the default route" and "what is the
/// gateway on that device".
#[derive(Debug, Clone)]
pub struct GatewayResolver<S> {
    source: S,
}

impl<S: TableSource> GatewayResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Device of the default route, or an empty string when there is none.
    pub fn find_default_route_device(&self) -> Result<String, NetworkError> {
        let routes = self.source.route_table()?;
        let device = tables::default_route_device(&routes);
        debug!(device = %device, "default route device");
        Ok(device)
    }

    /// Gateway address info from the first ARP row mentioning `device`.
    ///
    /// Returns [`InterfaceInfo::empty`] when no row matches.
    pub fn find_gateway_info(&self, device: &str) -> Result<InterfaceInfo, NetworkError> {
        let arp = self.source.arp_table()?;

        let Some(record) = tables::find_arp_record(&arp, device)? else {
            debug!(device = %device, "no address-resolution entry for device");
            return Ok(InterfaceInfo::empty());
        };

        debug!(
            device = %device,
            gateway_ip = %record.ip,
            gateway_mac = %record.hardware_address,
            "found gateway"
        );

        Ok(InterfaceInfo {
            name: device.to_string(),
            hardware_address: Some(record.hardware_address),
            ipv4_address: record.ip,
        })
    }

    /// Gateway info on the default route's device.
    ///
    /// Empty when the host has no default route.
    pub fn default_gateway(&self) -> Result<InterfaceInfo, NetworkError> {
        let device = self.find_default_route_device()?;
        if device.is_empty() {
            return Ok(InterfaceInfo::empty());
        }
        self.find_gateway_info(&device)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::Ipv4Addr;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::command::IpCommand;

    const ARP: &str = "\
IP address       HW type     Flags       HW address            Mask     Device
10.0.0.1   0x1   0x2   aa:bb:cc:dd:ee:ff   *   eth3
";

    #[test]
    fn test_default_route_device() {
        let resolver = GatewayResolver::new(StaticTables::new("default via 10.0.0.1 dev eth3\n", ""));
        assert_eq!(resolver.find_default_route_device().unwrap(), "eth3");
    }

    #[test]
    fn test_gateway_info() {
        let resolver = GatewayResolver::new(StaticTables::new("", ARP));
        let info = resolver.find_gateway_info("eth3").unwrap();

        assert_eq!(info.name, "eth3");
        assert_eq!(info.ipv4_address, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(
            info.hardware_address.unwrap().to_string(),
            "aa:bb:cc:dd:ee:ff"
        );
    }

    #[test]
    fn test_gateway_info_no_match_is_empty() {
        let resolver = GatewayResolver::new(StaticTables::new("", ARP));
        assert!(resolver.find_gateway_info("wlan0").unwrap().is_empty());
    }

    #[test]
    fn test_default_gateway_without_default_route() {
        let resolver = GatewayResolver::new(StaticTables::new("10.0.0.0/24 dev eth3\n", ARP));
        assert!(resolver.default_gateway().unwrap().is_empty());
    }

    #[test]
    fn test_kernel_tables_reads_arp_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ARP.as_bytes()).unwrap();

        let source = KernelTables::new(IpCommand::new("echo"), file.path());
        assert_eq!(source.arp_table().unwrap(), ARP);
        // `echo route` stands in for the ip binary.
        assert_eq!(source.route_table().unwrap(), "route\n");
    }

    #[test]
    fn test_kernel_tables_missing_arp_file() {
        let source = KernelTables::new(IpCommand::new("echo"), "/nonexistent/arp");
        assert!(matches!(
            source.arp_table(),
            Err(NetworkError::TableRead { .. })
        ));
    }
}
