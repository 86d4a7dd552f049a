//! Parsers for the kernel's textual routing and address-resolution exports.
//!
//! Both exports are whitespace-delimited with a fixed column layout. The
//! parsers here extract only the columns they need and are not a grammar
//! for either format.
//!
//! Routing rows (`ip route` output):
//! ```text
//! default via 10.0.0.1 dev eth3 proto dhcp metric 100
//! 10.0.0.0/24 dev eth3 proto kernel scope link src 10.0.0.7
//! ```
//!
//! Address-resolution rows (`/proc/net/arp`):
//! ```text
//! IP address       HW type     Flags       HW address            Mask     Device
//! 10.0.0.1         0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth3
//! ```

use std::net::Ipv4Addr;

use tracing::warn;

use crate::error::NetworkError;
use crate::types::HardwareAddr;

/// Marker for the default route's destination column.
pub const DEFAULT_ROUTE: &str = "default";

const ARP_IP_COLUMN: usize = 0;
const ARP_MAC_COLUMN: usize = 3;
const ARP_DEVICE_COLUMN: usize = 5;

/// One routing-table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// Destination prefix, or `default`.
    pub destination: String,
    /// Egress device, when the row names one.
    pub device: Option<String>,
}

impl RouteRecord {
    /// Whether this row is the default route.
    pub fn is_default(&self) -> bool {
        self.destination == DEFAULT_ROUTE
    }
}

/// One address-resolution cache row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpRecord {
    pub ip: Ipv4Addr,
    pub hardware_address: HardwareAddr,
    pub device: String,
}

/// Collapse runs of consecutive spaces into a single space.
///
/// Only the space character is collapsed; tabs and other whitespace are kept.
pub fn collapse_spaces(row: &str) -> String {
    let mut out = String::with_capacity(row.len());
    let mut prev_space = false;

    for c in row.chars() {
        if c == ' ' && prev_space {
            continue;
        }
        prev_space = c == ' ';
        out.push(c);
    }

    out
}

/// Parse one routing-table row.
///
/// The device is the token right after the first `dev` token.
pub fn parse_route(row: &str) -> Option<RouteRecord> {
    let mut fields = row.split(' ').filter(|f| !f.is_empty());
    let destination = fields.next()?.to_string();

    let mut device = None;
    while let Some(field) = fields.next() {
        if field == "dev" {
            device = fields.next().map(str::to_string);
            break;
        }
    }

    Some(RouteRecord {
        destination,
        device,
    })
}

/// Parse every non-empty routing-table row.
pub fn parse_routes(text: &str) -> Vec<RouteRecord> {
    text.lines().filter_map(parse_route).collect()
}

/// Device of the first default route, or an empty string when there is none.
///
/// A row is a candidate only if it starts with the literal `default`.
/// Default rows without a `dev` token are skipped.
pub fn default_route_device(text: &str) -> String {
    text.lines()
        .filter(|row| row.starts_with(DEFAULT_ROUTE))
        .find_map(|row| {
            let device = parse_route(row).and_then(|route| route.device);
            if device.is_none() {
                warn!(row = %row, "skipping default route without a device");
            }
            device
        })
        .unwrap_or_default()
}

/// Parse one address-resolution row after collapsing its spacing.
pub fn parse_arp_row(row: &str) -> Result<ArpRecord, NetworkError> {
    let collapsed = collapse_spaces(row.trim());
    let fields: Vec<&str> = collapsed.split(' ').collect();

    if fields.len() <= ARP_MAC_COLUMN {
        return Err(NetworkError::MalformedRow {
            row: row.to_string(),
        });
    }

    let ip = fields[ARP_IP_COLUMN]
        .parse::<Ipv4Addr>()
        .map_err(|_| NetworkError::AddressParse {
            value: fields[ARP_IP_COLUMN].to_string(),
        })?;
    let hardware_address = fields[ARP_MAC_COLUMN].parse::<HardwareAddr>()?;
    let device = fields
        .get(ARP_DEVICE_COLUMN)
        .copied()
        .unwrap_or_default()
        .to_string();

    Ok(ArpRecord {
        ip,
        hardware_address,
        device,
    })
}

/// Parse every data row of an address-resolution export.
///
/// The first row is treated as the header only when it does not start with
/// an IPv4 address, so header-less snapshots keep their first record. Blank
/// rows are skipped.
pub fn parse_arp(text: &str) -> Result<Vec<ArpRecord>, NetworkError> {
    let mut rows = text.lines().peekable();
    if rows.peek().is_some_and(|first| !starts_with_ipv4(first)) {
        rows.next();
    }

    rows.filter(|row| {
        let blank = row.trim().is_empty();
        if blank {
            warn!("skipping blank address-resolution row");
        }
        !blank
    })
    .map(parse_arp_row)
    .collect()
}

fn starts_with_ipv4(row: &str) -> bool {
    row.split_whitespace()
        .next()
        .is_some_and(|field| field.parse::<Ipv4Addr>().is_ok())
}

/// First row that mentions `device` anywhere in its text.
///
/// This is a substring match over the whole row, not the device column, so
/// a device name that also occurs in another column matches too.
pub fn find_arp_record(text: &str, device: &str) -> Result<Option<ArpRecord>, NetworkError> {
    text.lines()
        .find(|row| row.contains(device))
        .map(parse_arp_row)
        .transpose()
}

/// First row whose device column equals `device`.
pub fn find_arp_record_strict(
    text: &str,
    device: &str,
) -> Result<Option<ArpRecord>, NetworkError> {
    text.lines()
        .find(|row| {
            collapse_spaces(row.trim())
                .split(' ')
                .nth(ARP_DEVICE_COLUMN)
                .is_some_and(|d| d == device)
        })
        .map(parse_arp_row)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ARP: &str = "\
IP address       HW type     Flags       HW address            Mask     Device
10.0.0.1         0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth3
192.168.7.1      0x1         0x2         02:42:ac:11:00:02     *        docker0
";

    #[rstest]
    #[case("a  b   c", "a b c")]
    #[case("  lead", " lead")]
    #[case("trail   ", "trail ")]
    #[case("none", "none")]
    #[case("", "")]
    #[case("tab\t\tkept", "tab\t\tkept")]
    fn test_collapse_spaces(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(collapse_spaces(input), expected);
    }

    #[test]
    fn test_default_route_device() {
        let routes = "\
10.0.0.0/24 dev eth3 proto kernel scope link src 10.0.0.7
default via 10.0.0.1 dev eth3
";
        assert_eq!(default_route_device(routes), "eth3");
    }

    #[rstest]
    #[case("")]
    #[case("10.0.0.0/24 dev eth3 proto kernel scope link\n")]
    #[case(" default via 10.0.0.1 dev eth3\n")]
    #[case("default via 10.0.0.1\n")]
    fn test_default_route_device_absent(#[case] routes: &str) {
        assert_eq!(default_route_device(routes), "");
    }

    #[test]
    fn test_default_route_uses_first_match() {
        let routes = "\
default via 10.0.0.1 dev wlan0 metric 600
default via 192.168.1.1 dev eth0 metric 100
";
        assert_eq!(default_route_device(routes), "wlan0");
    }

    #[test]
    fn test_parse_routes() {
        let routes = parse_routes("default via 10.0.0.1 dev eth3\n\n10.0.0.0/24 dev eth3\nunreachable 10.9.0.0/16\n");
        assert_eq!(routes.len(), 3);
        assert!(routes[0].is_default());
        assert_eq!(routes[1].destination, "10.0.0.0/24");
        assert_eq!(routes[2].device, None);
    }

    #[test]
    fn test_find_arp_record() {
        let record = find_arp_record(ARP, "eth3").unwrap().unwrap();
        assert_eq!(record.ip, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(record.hardware_address.to_string(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(record.device, "eth3");
    }

    #[test]
    fn test_find_arp_record_missing() {
        assert_eq!(find_arp_record(ARP, "eth9").unwrap(), None);
    }

    #[test]
    fn test_irregular_spacing_parses_like_single_spacing() {
        let spaced = parse_arp_row("10.0.0.1   0x1   0x2   aa:bb:cc:dd:ee:ff   *   eth3").unwrap();
        let single = parse_arp_row("10.0.0.1 0x1 0x2 aa:bb:cc:dd:ee:ff * eth3").unwrap();
        assert_eq!(spaced, single);
    }

    #[test]
    fn test_malformed_rows() {
        assert!(matches!(
            parse_arp_row("10.0.0.300 0x1 0x2 aa:bb:cc:dd:ee:ff * eth3"),
            Err(NetworkError::AddressParse { .. })
        ));
        assert!(matches!(
            parse_arp_row("10.0.0.1 0x1 0x2 aa:bb:cc:dd:ee * eth3"),
            Err(NetworkError::HardwareAddressParse { .. })
        ));
        assert!(matches!(
            parse_arp_row("10.0.0.1 0x1 eth3"),
            Err(NetworkError::MalformedRow { .. })
        ));
    }

    #[test]
    fn test_parse_arp_skips_header() {
        let records = parse_arp(ARP).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].device, "docker0");
    }

    #[test]
    fn test_parse_arp_without_header_keeps_first_record() {
        let records = parse_arp(
            "10.0.0.1 0x1 0x2 aa:bb:cc:dd:ee:ff * eth3\n\n192.168.7.1 0x1 0x2 02:42:ac:11:00:02 * docker0\n",
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ip, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(records[1].device, "docker0");
    }

    #[test]
    fn test_default_route_without_device_is_skipped() {
        let routes = "\
default via 10.0.0.1
default via 192.168.1.1 dev eth0 metric 100
";
        assert_eq!(default_route_device(routes), "eth0");
    }

    #[test]
    fn test_substring_match_is_looser_than_device_column() {
        // "eth3" appears only inside the second row's device name "veth3a".
        let arp = "\
IP address       HW type     Flags       HW address            Mask     Device
172.17.0.2       0x1         0x2         02:42:ac:11:00:02     *        veth3a
10.0.0.1         0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth3
";
        let loose = find_arp_record(arp, "eth3").unwrap().unwrap();
        assert_eq!(loose.device, "veth3a");

        let strict = find_arp_record_strict(arp, "eth3").unwrap().unwrap();
        assert_eq!(strict.device, "eth3");
        assert_eq!(strict.ip, Ipv4Addr::new(10, 0, 0, 1));
    }
}
