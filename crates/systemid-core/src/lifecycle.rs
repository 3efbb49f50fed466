//! Record lifecycle: initialize or load, mutate, stamp, persist.

use crate::clock::Clock;
use crate::crc;
use crate::date::BcdDate;
use crate::error::Result;
use crate::layout::{Record, RecordBytes, TAG_ID};
use crate::mac::MacAddress;
use crate::storage::Storage;

/// Build a fresh record: zeroed, tagged, dated from `clock` and stamped.
///
/// When `hw_mac` is given it becomes MAC slot 0 with a count of 1. A clock
/// failure is fatal since an undated record is not well formed.
pub fn initialize(clock: &impl Clock, hw_mac: Option<MacAddress>) -> Result<Record> {
    let now = clock.now_utc()?;

    let mut record = Record::zeroed();
    record.tag = TAG_ID;
    record.date = BcdDate::from_datetime(now);
    if let Some(mac) = hw_mac {
        record.mac_table[0] = mac;
        record.mac_count = 1;
    }
    crc::stamp(&mut record);

    tracing::info!("initialized record dated {}", record.date);
    Ok(record)
}

/// [`initialize`], optionally taking the read-only MAC from `storage`.
pub fn initialize_from(
    clock: &impl Clock,
    storage: &impl Storage,
    read_hw_mac: bool,
) -> Result<Record> {
    let hw_mac = if read_hw_mac {
        let mac = storage.read_fixed_mac()?;
        tracing::info!("hardware MAC {mac}");
        Some(mac)
    } else {
        None
    };
    initialize(clock, hw_mac)
}

/// Decode the record currently in `storage`.
///
/// The checksum is not checked here; call [`crc::verify`] when the contents
/// need to be trusted.
pub fn load(storage: &impl Storage) -> Result<Record> {
    let bytes = storage.load()?;
    Record::decode(&bytes)
}

/// Stamp the record and encode it.
pub fn finalize(record: &mut Record) -> RecordBytes {
    crc::stamp(record);
    record.encode()
}

/// Stamp the record and write it to `storage`.
pub fn persist(record: &mut Record, storage: &impl Storage) -> Result<()> {
    let bytes = finalize(record);
    debug_assert!(crc::verify_bytes(&bytes));
    storage.store(&bytes)?;
    tracing::info!("record written (CRC {:08X})", record.checksum);
    Ok(())
}
