//! Field mutation from operator-entered strings.
//!
//! Every setter is best effort: malformed numeric tokens narrow to a value
//! instead of failing, so one bad token never aborts a batch of updates. The
//! caller is expected to dump the record and look at it before writing.

use crate::error::{Error, Result};
use crate::layout::{Record, ERRATA_LEN, MAC_CAPACITY, SERIAL_LEN};
use crate::parse::narrow_u8;

/// Tokens of a `v<major>.<minor>[.<errata>]` hardware revision string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HwRevision<'a> {
    pub major: Option<u8>,
    pub minor: Option<u8>,
    pub errata: Option<&'a str>,
}

impl<'a> HwRevision<'a> {
    /// Split on every `v` and `.`, skipping empty tokens.
    ///
    /// The first token is the major number, the second the minor number and
    /// the third the errata. Later tokens are ignored.
    pub fn parse(text: &'a str) -> Self {
        let mut tokens = text.split(['v', '.']).filter(|tok| !tok.is_empty());
        let major = tokens.next().map(|tok| narrow_u8(tok, 10));
        let minor = major.and(tokens.next()).map(|tok| narrow_u8(tok, 10));
        let errata = minor.and(tokens.next());
        HwRevision {
            major,
            minor,
            errata,
        }
    }
}

impl Record {
    /// Copy up to [`SERIAL_LEN`] bytes of `serial`, zero padding the rest.
    pub fn set_serial(&mut self, serial: &str) {
        let bytes = serial.as_bytes();
        let n = bytes.len().min(SERIAL_LEN);
        self.serial = [0; SERIAL_LEN];
        self.serial[..n].copy_from_slice(&bytes[..n]);
        if bytes.len() > SERIAL_LEN {
            tracing::debug!("serial number truncated to {SERIAL_LEN} bytes");
        }
    }

    /// Apply a `v<major>.<minor>[.<errata>]` string.
    ///
    /// Only the fields present in `text` are written. An errata token longer
    /// than two characters is cut; a one character token writes the first
    /// errata byte and leaves the second as it was.
    pub fn set_hw_revision(&mut self, text: &str) {
        let rev = HwRevision::parse(text);
        if let Some(major) = rev.major {
            tracing::debug!("major: {major}");
            self.major = major;
        }
        if let Some(minor) = rev.minor {
            tracing::debug!("minor: {minor}");
            self.minor = minor;
        }
        if let Some(errata) = rev.errata {
            tracing::debug!("errata: {errata}");
            let bytes = errata.as_bytes();
            let n = bytes.len().min(ERRATA_LEN);
            self.errata[..n].copy_from_slice(&bytes[..n]);
        }
    }

    /// Apply a colon-separated hex MAC string to the 0-based `slot`.
    ///
    /// Token handling is that of [`crate::MacAddress::apply`]. `mac_count`
    /// grows to cover `slot` and never shrinks.
    pub fn set_mac(&mut self, slot: usize, text: &str) -> Result<()> {
        let Some(mac) = self.mac_table.get_mut(slot) else {
            return Err(Error::SlotOutOfRange {
                slot,
                capacity: MAC_CAPACITY,
            });
        };
        mac.apply(text);
        tracing::debug!("mac{}: {mac}", slot + 1);

        // slot < MAC_CAPACITY, which fits in u8
        let needed = (slot + 1) as u8;
        if self.mac_count < needed {
            self.mac_count = needed;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mac::MacAddress;

    #[test]
    fn revision_with_errata() {
        let mut r = Record::zeroed();
        r.set_hw_revision("v2.5.AB");
        assert_eq!((r.major, r.minor), (2, 5));
        assert_eq!(&r.errata, b"AB");
    }

    #[test]
    fn revision_without_errata_keeps_existing() {
        let mut r = Record::zeroed();
        r.errata = *b"XY";
        r.set_hw_revision("v10.0");
        assert_eq!((r.major, r.minor), (10, 0));
        assert_eq!(&r.errata, b"XY");
    }

    #[test]
    fn empty_revision_is_noop() {
        let mut r = Record::zeroed();
        r.major = 3;
        r.minor = 4;
        r.errata = *b"CD";
        let before = r.clone();
        r.set_hw_revision("");
        assert_eq!(r, before);
        r.set_hw_revision("v..v");
        assert_eq!(r, before);
    }

    #[test]
    fn major_only_leaves_minor() {
        let mut r = Record::zeroed();
        r.minor = 7;
        r.set_hw_revision("v4");
        assert_eq!((r.major, r.minor), (4, 7));
    }

    #[test]
    fn long_errata_is_cut() {
        let mut r = Record::zeroed();
        r.set_hw_revision("v1.0.rc1");
        assert_eq!(&r.errata, b"rc");
    }

    #[test]
    fn short_errata_keeps_second_byte() {
        let mut r = Record::zeroed();
        r.errata = *b"AB";
        r.set_hw_revision("v1.2.C");
        assert_eq!(&r.errata, b"CB");
    }

    #[test]
    fn leading_v_is_optional() {
        let mut r = Record::zeroed();
        r.set_hw_revision("3.1");
        assert_eq!((r.major, r.minor), (3, 1));
    }

    #[test]
    fn errata_containing_v_splits_there() {
        let rev = HwRevision::parse("v1.0.rev2");
        assert_eq!(rev.errata, Some("re"));
    }

    // Malformed revision numbers are narrowed, not rejected.
    #[test]
    fn revision_narrows_instead_of_failing() {
        let mut r = Record::zeroed();
        r.set_hw_revision("v300.x");
        assert_eq!((r.major, r.minor), (255, 0));
        r.set_hw_revision("v-2.7beta");
        assert_eq!((r.major, r.minor), (0, 7));
    }

    #[test]
    fn revision_tokens() {
        assert_eq!(
            HwRevision::parse("v2.5.AB"),
            HwRevision {
                major: Some(2),
                minor: Some(5),
                errata: Some("AB"),
            }
        );
        assert_eq!(HwRevision::parse(""), HwRevision::default());
    }

    #[test]
    fn serial_is_zero_padded() {
        let mut r = Record::zeroed();
        r.serial = [b'#'; SERIAL_LEN];
        r.set_serial("AB12");
        assert_eq!(&r.serial, b"AB12\0\0\0\0\0\0");
    }

    #[test]
    fn serial_is_truncated() {
        let mut r = Record::zeroed();
        r.set_serial("0123456789ABCDEF");
        assert_eq!(&r.serial, b"0123456789");
    }

    #[test]
    fn mac_full_address() {
        let mut r = Record::zeroed();
        r.set_mac(0, "AA:BB:CC:DD:EE:FF").unwrap();
        assert_eq!(r.mac_table[0].octets(), [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(r.mac_count, 1);
    }

    #[test]
    fn mac_partial_keeps_prior_bytes() {
        let mut r = Record::zeroed();
        r.mac_table[1] = MacAddress::new([1, 2, 3, 4, 5, 6]);
        r.set_mac(1, "01:02").unwrap();
        assert_eq!(r.mac_table[1].octets(), [0x01, 0x02, 3, 4, 5, 6]);
    }

    #[test]
    fn mac_count_only_grows() {
        let mut r = Record::zeroed();
        r.mac_count = 1;
        r.set_mac(3, "02:00:00:00:00:04").unwrap();
        assert_eq!(r.mac_count, 4);
        r.set_mac(0, "02:00:00:00:00:01").unwrap();
        assert_eq!(r.mac_count, 4);
    }

    // Bad hex tokens write 0 rather than rejecting the address.
    #[test]
    fn mac_narrows_instead_of_failing() {
        let mut r = Record::zeroed();
        r.set_mac(0, "gg:12:xyz:34:56:78").unwrap();
        assert_eq!(r.mac_table[0].octets(), [0x00, 0x12, 0x00, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn mac_slot_out_of_range() {
        let mut r = Record::zeroed();
        let err = r.set_mac(MAC_CAPACITY, "01:02:03:04:05:06").unwrap_err();
        assert!(matches!(
            err,
            Error::SlotOutOfRange { slot, capacity } if slot == MAC_CAPACITY && capacity == MAC_CAPACITY
        ));
        assert_eq!(r.mac_count, 0);
    }

    #[test]
    fn last_slot_is_writable() {
        let mut r = Record::zeroed();
        r.set_mac(MAC_CAPACITY - 1, "ff").unwrap();
        assert_eq!(usize::from(r.mac_count), MAC_CAPACITY);
    }

    #[test]
    fn setters_are_idempotent() {
        let mut once = Record::zeroed();
        once.set_serial("X1");
        once.set_hw_revision("v1.2.ab");
        once.set_mac(2, "de:ad:be:ef:00:01").unwrap();

        let mut twice = once.clone();
        twice.set_serial("X1");
        twice.set_hw_revision("v1.2.ab");
        twice.set_mac(2, "de:ad:be:ef:00:01").unwrap();
        assert_eq!(once, twice);
    }
}
