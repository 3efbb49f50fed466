//! Storage collaborator: the byte image of the EEPROM.

use std::cell::RefCell;
use std::io;

use crate::error::{Error, Result};
use crate::layout::{RecordBytes, RECORD_SIZE};
use crate::mac::{MacAddress, MAC_LEN};

/// Offset of the factory-programmed, read-only EUI-48 in the device image.
pub const FIXED_MAC_OFFSET: u64 = 0xFA;

/// Positioned access to the device image.
///
/// The record always sits at offset 0 and is read and written as one unit.
pub trait Storage {
    /// Fill `buf` from `offset`. A short read is an error.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;

    /// Write `data` at `offset`, leaving the rest of the image untouched.
    fn write_at(&self, offset: u64, data: &[u8]) -> Result<()>;

    /// Read the raw record.
    fn load(&self) -> Result<RecordBytes> {
        let mut buf = [0u8; RECORD_SIZE];
        self.read_at(0, &mut buf)?;
        Ok(buf)
    }

    /// Write the raw record.
    fn store(&self, bytes: &RecordBytes) -> Result<()> {
        self.write_at(0, bytes)
    }

    /// Read the read-only hardware MAC address.
    fn read_fixed_mac(&self) -> Result<MacAddress> {
        let mut mac = [0u8; MAC_LEN];
        self.read_at(FIXED_MAC_OFFSET, &mut mac)?;
        Ok(MacAddress::new(mac))
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        (**self).read_at(offset, buf)
    }

    fn write_at(&self, offset: u64, data: &[u8]) -> Result<()> {
        (**self).write_at(offset, data)
    }
}

/// An in-memory device image. Writes past the end grow the image.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    image: RefCell<Vec<u8>>,
}

impl MemoryStorage {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image: RefCell::new(image),
        }
    }

    /// An erased device of `len` bytes (all `0xFF`).
    pub fn erased(len: usize) -> Self {
        Self::new(vec![0xFF; len])
    }

    /// Copy of the current image.
    pub fn image(&self) -> Vec<u8> {
        self.image.borrow().clone()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.image.into_inner()
    }
}

impl Storage for MemoryStorage {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let image = self.image.borrow();
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        let end = start.saturating_add(buf.len());
        let Some(src) = image.get(start..end) else {
            return Err(Error::io(
                format!("reading {} bytes at offset {offset:#x}", buf.len()),
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("image is only {} bytes", image.len()),
                ),
            ));
        };
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write_at(&self, offset: u64, data: &[u8]) -> Result<()> {
        let mut image = self.image.borrow_mut();
        let start = usize::try_from(offset).map_err(|_| {
            Error::io(
                format!("writing at offset {offset:#x}"),
                io::Error::new(io::ErrorKind::InvalidInput, "offset out of range"),
            )
        })?;
        let end = start + data.len();
        if image.len() < end {
            image.resize(end, 0);
        }
        image[start..end].copy_from_slice(data);
        Ok(())
    }
}
