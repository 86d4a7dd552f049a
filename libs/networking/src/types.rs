//! Value types shared by the resolvers.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::NetworkError;

/// 6-byte link-layer (MAC) address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HardwareAddr([u8; 6]);

impl HardwareAddr {
    /// Create from raw octets.
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Get the raw octets.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Build from a link-layer address slice, as reported by the kernel.
    ///
    /// Returns `None` unless the slice is exactly 6 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 6]>::try_from(bytes).ok().map(Self)
    }
}

impl FromStr for HardwareAddr {
    type Err = NetworkError;

    /// Parse `aa:bb:cc:dd:ee:ff` (or `-`-separated) notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || NetworkError::HardwareAddressParse {
            value: s.to_string(),
        };

        let sep = if s.contains('-') { '-' } else { ':' };
        let mut octets = [0u8; 6];
        let mut parts = s.split(sep);

        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(err)?;
            if part.len() != 2 {
                return Err(err());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| err())?;
        }

        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for HardwareAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl Serialize for HardwareAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Identity and addressing of a network interface at a point in time.
///
/// `ipv4_address` is [`Ipv4Addr::UNSPECIFIED`] when no IPv4 address is bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    /// Interface name as known to the kernel.
    pub name: String,

    /// Link-layer address.
    pub hardware_address: Option<HardwareAddr>,

    /// First IPv4 address bound to the interface.
    pub ipv4_address: Ipv4Addr,
}

impl InterfaceInfo {
    /// An info with every field unset.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            hardware_address: None,
            ipv4_address: Ipv4Addr::UNSPECIFIED,
        }
    }

    /// Whether every field is unset.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.hardware_address.is_none() && !self.has_ipv4()
    }

    /// Whether an IPv4 address was found.
    pub fn has_ipv4(&self) -> bool {
        !self.ipv4_address.is_unspecified()
    }
}

impl Default for InterfaceInfo {
    fn default() -> Self {
        Self::empty()
    }
}
