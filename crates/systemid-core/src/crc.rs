//! CRC32 guard over the record.
//!
//! The checksum is the IEEE 802.3 CRC32 (zlib `crc32`) of every byte before the
//! checksum field. It is stored big-endian; comparison always decodes the
//! stored value to host order first and compares integers.

use crc::{Crc, CRC_32_ISO_HDLC};

use crate::error::{Error, Result};
use crate::layout::{Record, CHECKSUM_OFFSET, RECORD_SIZE};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// CRC32 of `data`.
pub fn compute(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// CRC32 over the checksummed span of a record, i.e. everything but the
/// trailing checksum field.
pub fn compute_record(record: &Record) -> u32 {
    compute(&record.encode()[..CHECKSUM_OFFSET])
}

/// Recompute and store the checksum.
pub fn stamp(record: &mut Record) {
    let crc = compute_record(record);
    tracing::debug!("update CRC ({:08X} -> {:08X})", record.checksum, crc);
    record.checksum = crc;
}

/// Consume a record and return it stamped.
pub fn stamped(mut record: Record) -> Record {
    stamp(&mut record);
    record
}

/// Check the stored checksum, returning the mismatch as an error.
pub fn check(record: &Record) -> Result<()> {
    let computed = compute_record(record);
    if computed == record.checksum {
        Ok(())
    } else {
        Err(Error::ChecksumMismatch {
            stored: record.checksum,
            computed,
        })
    }
}

/// Whether the stored checksum matches the contents. A mismatch is logged.
pub fn verify(record: &Record) -> bool {
    match check(record) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("{e}");
            false
        }
    }
}

/// Verify an encoded image without decoding it.
///
/// Returns false for anything that is not exactly [`RECORD_SIZE`] bytes.
pub fn verify_bytes(bytes: &[u8]) -> bool {
    if bytes.len() != RECORD_SIZE {
        tracing::warn!(
            "cannot verify {} bytes, record is {RECORD_SIZE} bytes",
            bytes.len()
        );
        return false;
    }
    let (body, stored) = bytes.split_at(CHECKSUM_OFFSET);
    let stored = u32::from_be_bytes([stored[0], stored[1], stored[2], stored[3]]);
    let computed = compute(body);
    if stored != computed {
        tracing::warn!("CRC invalid: stored {stored:08X} != computed {computed:08X}");
    }
    stored == computed
}
