//! Host/network byte order conversion for link-layer socket fields.

/// Every protocol, as the link-layer protocol selector (`ETH_P_ALL`).
pub const ETH_P_ALL: u16 = libc::ETH_P_ALL as u16;

/// Convert a 16-bit value from host to network byte order.
///
/// Byte 0 becomes the high byte and byte 1 the low byte, unconditionally.
/// Applying it twice returns the input.
pub const fn htons(value: u16) -> u16 {
    (value << 8) | (value >> 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_htons_swaps_bytes() {
        assert_eq!(htons(0x0102), 0x0201);
        assert_eq!(htons(0x1234), 0x3412);
        assert_eq!(htons(0x0000), 0x0000);
        assert_eq!(htons(0xff00), 0x00ff);
    }

    #[test]
    fn test_eth_p_all_encoding() {
        assert_eq!(ETH_P_ALL, 0x0003);
        assert_eq!(htons(ETH_P_ALL), 0x0300);
    }

    proptest! {
        #[test]
        fn htons_is_an_involution(x in any::<u16>()) {
            prop_assert_eq!(htons(htons(x)), x);
        }

        #[test]
        fn htons_puts_low_byte_first_on_the_wire(x in any::<u16>()) {
            prop_assert_eq!(htons(x).to_be_bytes(), [x as u8, (x >> 8) as u8]);
        }
    }
}
