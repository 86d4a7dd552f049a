//! Interface name resolution.
//!
//! Maps an interface name to its kernel index and to an [`InterfaceInfo`]
//! snapshot by querying the local network stack. Nothing is cached; every
//! call re-queries the kernel.

use std::net::{IpAddr, Ipv4Addr, SocketAddrV4, SocketAddrV6};

use nix::ifaddrs::getifaddrs;
use nix::net::if_::if_nametoindex;
use nix::sys::socket::{SockaddrLike, SockaddrStorage};
use tracing::debug;

use crate::error::NetworkError;
use crate::types::{HardwareAddr, InterfaceInfo};

/// Resolve an interface name to its kernel index.
pub fn resolve_index(name: &str) -> Result<u32, NetworkError> {
    if_nametoindex(name).map_err(|_| NetworkError::InterfaceNotFound {
        name: name.to_string(),
    })
}

/// Resolve an interface's hardware address and first IPv4 address.
///
/// Addresses are scanned in the order the kernel reports them. An interface
/// without any IPv4 address is not an error; see [`interface_info`] for the
/// shape of the result.
pub fn resolve_info(name: &str) -> Result<InterfaceInfo, NetworkError> {
    let index = resolve_index(name)?;

    let mut hardware_address = None;
    let mut addresses = Vec::new();

    for ifaddr in getifaddrs().map_err(NetworkError::InterfaceQuery)? {
        if ifaddr.interface_name != name {
            continue;
        }
        let Some(address) = ifaddr.address else {
            continue;
        };

        if let Some(link) = address.as_link_addr() {
            if hardware_address.is_none() {
                hardware_address = link.addr().map(HardwareAddr::new);
            }
            continue;
        }

        if let Some(ip) = ip_of(&address) {
            if let Some(mask) = ifaddr.netmask.as_ref().and_then(ip_of) {
                let prefix_len = prefix_len_from_mask(mask)?;
                debug!(interface = %name, %ip, prefix_len, "interface address");
            }
            addresses.push(ip);
        }
    }

    let info = interface_info(name, hardware_address, &addresses);

    debug!(
        interface = %name,
        index,
        mac = ?info.hardware_address.map(|m| m.to_string()),
        ipv4 = %info.ipv4_address,
        addresses = addresses.len(),
        "resolved interface"
    );

    Ok(info)
}

/// Assemble the info for interface `name` from its link and IP addresses.
///
/// With an IPv4 address the info carries the name, hardware address and
/// that address. Without one only the hardware address is set.
pub fn interface_info(
    name: &str,
    hardware_address: Option<HardwareAddr>,
    addresses: &[IpAddr],
) -> InterfaceInfo {
    let ipv4_address = first_ipv4(addresses);
    if ipv4_address.is_unspecified() {
        return InterfaceInfo {
            hardware_address,
            ..InterfaceInfo::empty()
        };
    }

    InterfaceInfo {
        name: name.to_string(),
        hardware_address,
        ipv4_address,
    }
}

/// First IPv4 address in `addresses`, or `0.0.0.0` when there is none.
pub fn first_ipv4(addresses: &[IpAddr]) -> Ipv4Addr {
    addresses
        .iter()
        .find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(*v4),
            IpAddr::V6(_) => None,
        })
        .unwrap_or(Ipv4Addr::UNSPECIFIED)
}

/// Convert a netmask to a prefix length.
///
/// Fails when the mask is not a contiguous run of leading ones.
pub fn prefix_len_from_mask(mask: IpAddr) -> Result<u8, NetworkError> {
    let (ones, zeros, width) = match mask {
        IpAddr::V4(m) => {
            let bits = u32::from(m);
            (bits.leading_ones(), bits.trailing_zeros(), 32)
        }
        IpAddr::V6(m) => {
            let bits = u128::from(m);
            (bits.leading_ones(), bits.trailing_zeros(), 128)
        }
    };

    if ones + zeros != width {
        return Err(NetworkError::AddressParse {
            value: format!("netmask {}", mask),
        });
    }

    Ok(ones as u8)
}

fn ip_of(address: &SockaddrStorage) -> Option<IpAddr> {
    if let Some(sin) = address.as_sockaddr_in() {
        return Some(IpAddr::V4(*SocketAddrV4::from(*sin).ip()));
    }
    if let Some(sin6) = address.as_sockaddr_in6() {
        return Some(IpAddr::V6(*SocketAddrV6::from(*sin6).ip()));
    }
    debug!(family = ?address.family(), "skipping non-IP interface address");
    None
}
