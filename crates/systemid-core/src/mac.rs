//! MAC address slot values.

use crate::parse::narrow_u8;

/// Bytes per MAC address slot.
pub const MAC_LEN: usize = 6;

/// A 6-byte MAC address as stored in one table slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; MAC_LEN]);

impl MacAddress {
    pub const fn new(bytes: [u8; MAC_LEN]) -> Self {
        Self(bytes)
    }

    pub fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }

    /// Overlay colon-separated hex tokens onto this address.
    ///
    /// Tokens are applied in order to bytes 0..6. Fewer than six tokens leave
    /// the trailing bytes as they were; tokens past the sixth are ignored.
    /// Empty tokens (`aa::bb`) are skipped. A malformed token writes 0 and an
    /// oversized one saturates to `0xFF`; nothing here fails.
    pub fn apply(&mut self, text: &str) {
        let tokens = text.split(':').filter(|tok| !tok.is_empty());
        for (slot, tok) in self.0.iter_mut().zip(tokens) {
            *slot = narrow_u8(tok, 16);
        }
    }

    /// Parse a full address from a zeroed starting point.
    pub fn parse(text: &str) -> Self {
        let mut mac = MacAddress::default();
        mac.apply(text);
        mac
    }
}

impl From<[u8; MAC_LEN]> for MacAddress {
    fn from(bytes: [u8; MAC_LEN]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_address() {
        let mac = MacAddress::parse("AA:BB:CC:DD:EE:FF");
        assert_eq!(mac.octets(), [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn lowercase_and_short_tokens() {
        let mac = MacAddress::parse("de:ad:be:ef:0:1");
        assert_eq!(mac.octets(), [0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01]);
    }

    #[test]
    fn partial_address_keeps_tail() {
        let mut mac = MacAddress::new([9, 9, 9, 9, 9, 9]);
        mac.apply("01:02");
        assert_eq!(mac.octets(), [0x01, 0x02, 9, 9, 9, 9]);
    }

    #[test]
    fn extra_tokens_ignored() {
        let mac = MacAddress::parse("1:2:3:4:5:6:7:8");
        assert_eq!(mac.octets(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn malformed_tokens_narrow_instead_of_failing() {
        let mac = MacAddress::parse("zz:1ff:0x10:-3:a:b");
        assert_eq!(mac.octets(), [0x00, 0xFF, 0x10, 0x00, 0x0A, 0x0B]);
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let mac = MacAddress::parse("aa::bb");
        assert_eq!(mac.octets(), [0xAA, 0xBB, 0, 0, 0, 0]);
    }

    #[test]
    fn empty_input_is_noop() {
        let mut mac = MacAddress::new([1, 2, 3, 4, 5, 6]);
        mac.apply("");
        assert_eq!(mac.octets(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn display_uppercase_hex() {
        let mac = MacAddress::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
        assert_eq!(mac.to_string(), "DE:AD:BE:EF:00:01");
    }
}
