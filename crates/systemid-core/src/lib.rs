//! SystemID EEPROM record handling.
//!
//! The SystemID record is a fixed-size block of identity metadata (tag,
//! hardware revision, serial number, build date, MAC addresses) read by
//! firmware and bootloaders. This crate owns the byte layout, the CRC32 guard
//! over it and the rules for turning operator input into field values.
//!
//! A typical update:
//!
//! ```text
//! storage --load--> decode --verify--> set_* ... --stamp--> encode --store--> storage
//! ```
//!
//! Storage and the wall clock are collaborators behind the [`Storage`] and
//! [`Clock`] traits.

pub mod clock;
pub mod crc;
pub mod date;
pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod mac;
pub mod mutate;
mod parse;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date::BcdDate;
pub use error::{Error, Result};
pub use layout::{Record, RecordBytes, MAC_CAPACITY, RECORD_SIZE, RESERVED_LEN};
pub use mac::MacAddress;
pub use mutate::HwRevision;
pub use storage::{MemoryStorage, Storage, FIXED_MAC_OFFSET};
