//! File-backed storage for the SystemID EEPROM.
//!
//! On Linux the EEPROM is exposed by the nvmem subsystem as
//! `/sys/bus/nvmem/devices/<name>/nvmem`. Any regular file holding a device
//! image works the same way, which is how images are prepared off-target.

mod device;

pub use device::{resolve_device_path, NvmemDevice, DEFAULT_DEVICE_BASE, DEFAULT_DEVICE_NAME};
