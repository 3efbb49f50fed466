//! nvmem device file access.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use systemid_core::{Error, Result, Storage};

/// Directory holding the nvmem devices.
pub const DEFAULT_DEVICE_BASE: &str = "/sys/bus/nvmem/devices";

/// nvmem name of the SystemID EEPROM.
pub const DEFAULT_DEVICE_NAME: &str = "0-00500";

/// Path of the nvmem cell file for device `name` under `base`.
pub fn resolve_device_path(base: &Path, name: &str) -> PathBuf {
    base.join(name).join("nvmem")
}

/// An EEPROM image behind a file path.
///
/// The file is opened for each access and closed again, so the device is never
/// held open between the load and the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NvmemDevice {
    path: PathBuf,
}

impl NvmemDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default SystemID EEPROM.
    pub fn system_default() -> Self {
        Self::new(resolve_device_path(
            Path::new(DEFAULT_DEVICE_BASE),
            DEFAULT_DEVICE_NAME,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, what: &str, source: std::io::Error) -> Error {
        Error::io(format!("{what} {}", self.path.display()), source)
    }
}

impl Storage for NvmemDevice {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        tracing::trace!(
            "read {} bytes at {offset:#x} from {}",
            buf.len(),
            self.path.display()
        );
        let mut file = File::open(&self.path).map_err(|e| self.io_error("opening", e))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| self.io_error("seeking in", e))?;
        file.read_exact(buf)
            .map_err(|e| self.io_error("reading", e))
    }

    fn write_at(&self, offset: u64, data: &[u8]) -> Result<()> {
        tracing::debug!(
            "write {} bytes at {offset:#x} to {}",
            data.len(),
            self.path.display()
        );
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| self.io_error("opening", e))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| self.io_error("seeking in", e))?;
        file.write_all(data)
            .map_err(|e| self.io_error("writing", e))?;
        file.flush().map_err(|e| self.io_error("flushing", e))
    }
}
