//! Fixed binary layout of the SystemID record.
//!
//! The layout follows the CCID structure of NXP application note AN3638 and is
//! packed: no field is aligned, the record is exactly [`RECORD_SIZE`] bytes.
//!
//! ```text
//! offset  size  field
//! 0x00    4     tag id "CCID"
//! 0x04    1     hardware revision, major
//! 0x05    1     hardware revision, minor
//! 0x06    10    serial number (zero padded)
//! 0x10    2     errata letters
//! 0x12    6     build date  YY MM DD hh mm ss
//! 0x18    R     reserved (R = RESERVED_LEN)
//! 0x18+R  1     number of populated MAC slots
//! 0x19+R  1     MAC flags
//! 0x1A+R  6*N   MAC table (N = MAC_CAPACITY)
//! end-4   4     CRC32, big-endian
//! ```
//!
//! The default build uses the 8-slot layout with 40 reserved bytes. The
//! `compact-layout` feature selects the legacy 6-slot layout without a reserved
//! block. A record carries no version tag, so a build handles exactly one.

use crate::date::{BcdDate, DATE_LEN};
use crate::error::{Error, Result};
use crate::mac::{MacAddress, MAC_LEN};

/// Literal tag identifying a CCID record.
pub const TAG_ID: [u8; TAG_LEN] = *b"CCID";

pub const TAG_LEN: usize = 4;
pub const SERIAL_LEN: usize = 10;
pub const ERRATA_LEN: usize = 2;
pub const CHECKSUM_LEN: usize = 4;

/// Number of MAC slots in the table.
#[cfg(not(feature = "compact-layout"))]
pub const MAC_CAPACITY: usize = 8;
#[cfg(feature = "compact-layout")]
pub const MAC_CAPACITY: usize = 6;

/// Size of the opaque reserved block between the date and the MAC table.
#[cfg(not(feature = "compact-layout"))]
pub const RESERVED_LEN: usize = 40;
#[cfg(feature = "compact-layout")]
pub const RESERVED_LEN: usize = 0;

pub const TAG_OFFSET: usize = 0;
pub const MAJOR_OFFSET: usize = TAG_OFFSET + TAG_LEN;
pub const MINOR_OFFSET: usize = MAJOR_OFFSET + 1;
pub const SERIAL_OFFSET: usize = MINOR_OFFSET + 1;
pub const ERRATA_OFFSET: usize = SERIAL_OFFSET + SERIAL_LEN;
pub const DATE_OFFSET: usize = ERRATA_OFFSET + ERRATA_LEN;
pub const RESERVED_OFFSET: usize = DATE_OFFSET + DATE_LEN;
pub const MAC_COUNT_OFFSET: usize = RESERVED_OFFSET + RESERVED_LEN;
pub const MAC_FLAGS_OFFSET: usize = MAC_COUNT_OFFSET + 1;
pub const MAC_TABLE_OFFSET: usize = MAC_FLAGS_OFFSET + 1;
pub const CHECKSUM_OFFSET: usize = MAC_TABLE_OFFSET + MAC_CAPACITY * MAC_LEN;

/// Total encoded size of a record.
pub const RECORD_SIZE: usize = CHECKSUM_OFFSET + CHECKSUM_LEN;

/// An encoded record.
pub type RecordBytes = [u8; RECORD_SIZE];

/// The decoded SystemID record.
///
/// Decoding is purely structural: nothing here checks the tag, the date or the
/// checksum. Use [`crate::crc`] to decide whether the contents can be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub tag: [u8; TAG_LEN],
    pub major: u8,
    pub minor: u8,
    /// Serial number, zero padded, not necessarily terminated.
    pub serial: [u8; SERIAL_LEN],
    pub errata: [u8; ERRATA_LEN],
    pub date: BcdDate,
    /// Never interpreted, preserved verbatim across read-modify-write.
    pub reserved: [u8; RESERVED_LEN],
    /// Populated MAC slots. May exceed [`MAC_CAPACITY`] in a corrupt image.
    pub mac_count: u8,
    pub mac_flags: u8,
    /// Every slot is serialized, populated or not.
    pub mac_table: [MacAddress; MAC_CAPACITY],
    /// CRC32 in host order. Encoded big-endian.
    pub checksum: u32,
}

impl Default for Record {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Record {
    /// A record with every byte zero.
    pub fn zeroed() -> Self {
        Record {
            tag: [0; TAG_LEN],
            major: 0,
            minor: 0,
            serial: [0; SERIAL_LEN],
            errata: [0; ERRATA_LEN],
            date: BcdDate::default(),
            reserved: [0; RESERVED_LEN],
            mac_count: 0,
            mac_flags: 0,
            mac_table: [MacAddress::default(); MAC_CAPACITY],
            checksum: 0,
        }
    }

    /// Decode a raw image. The slice must be exactly [`RECORD_SIZE`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let bytes: &RecordBytes = bytes.try_into().map_err(|_| Error::Format {
            expected: RECORD_SIZE,
            actual: bytes.len(),
        })?;

        let mut mac_table = [MacAddress::default(); MAC_CAPACITY];
        for (i, slot) in mac_table.iter_mut().enumerate() {
            let start = MAC_TABLE_OFFSET + i * MAC_LEN;
            *slot = MacAddress(field(bytes, start));
        }

        Ok(Record {
            tag: field(bytes, TAG_OFFSET),
            major: bytes[MAJOR_OFFSET],
            minor: bytes[MINOR_OFFSET],
            serial: field(bytes, SERIAL_OFFSET),
            errata: field(bytes, ERRATA_OFFSET),
            date: BcdDate::from_bytes(field(bytes, DATE_OFFSET)),
            reserved: field(bytes, RESERVED_OFFSET),
            mac_count: bytes[MAC_COUNT_OFFSET],
            mac_flags: bytes[MAC_FLAGS_OFFSET],
            mac_table,
            checksum: u32::from_be_bytes(field(bytes, CHECKSUM_OFFSET)),
        })
    }

    /// Encode into the fixed layout.
    pub fn encode(&self) -> RecordBytes {
        let mut out = [0u8; RECORD_SIZE];
        out[TAG_OFFSET..MAJOR_OFFSET].copy_from_slice(&self.tag);
        out[MAJOR_OFFSET] = self.major;
        out[MINOR_OFFSET] = self.minor;
        out[SERIAL_OFFSET..ERRATA_OFFSET].copy_from_slice(&self.serial);
        out[ERRATA_OFFSET..DATE_OFFSET].copy_from_slice(&self.errata);
        out[DATE_OFFSET..RESERVED_OFFSET].copy_from_slice(&self.date.to_bytes());
        out[RESERVED_OFFSET..MAC_COUNT_OFFSET].copy_from_slice(&self.reserved);
        out[MAC_COUNT_OFFSET] = self.mac_count;
        out[MAC_FLAGS_OFFSET] = self.mac_flags;
        for (i, mac) in self.mac_table.iter().enumerate() {
            let start = MAC_TABLE_OFFSET + i * MAC_LEN;
            out[start..start + MAC_LEN].copy_from_slice(&mac.0);
        }
        out[CHECKSUM_OFFSET..].copy_from_slice(&self.checksum.to_be_bytes());
        out
    }

    /// The populated MAC slots, `mac_count` clamped to the table size.
    pub fn macs(&self) -> &[MacAddress] {
        let count = usize::from(self.mac_count).min(MAC_CAPACITY);
        &self.mac_table[..count]
    }

    pub fn tag_str(&self) -> String {
        until_nul(&self.tag)
    }

    pub fn serial_str(&self) -> String {
        until_nul(&self.serial)
    }

    pub fn errata_str(&self) -> String {
        until_nul(&self.errata)
    }

    pub fn has_errata(&self) -> bool {
        self.errata.iter().any(|&b| b != 0)
    }
}

/// Copy a fixed-width field out of an encoded record.
fn field<const N: usize>(bytes: &RecordBytes, start: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[start..start + N]);
    out
}

/// Content of a fixed-width text field up to the first zero byte.
fn until_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
