//! `systemid-updater check`: verify and dump the stored record.

use anyhow::{Context, Result};
use systemid_core::{crc, lifecycle, Storage};

use crate::dump::{self, OutputFormat};

/// Load the record and dump it. Returns whether its CRC matches.
///
/// A mismatch is reported in the dump, it is not an error.
pub fn run(storage: &impl Storage, format: OutputFormat) -> Result<bool> {
    let record = lifecycle::load(storage).context("loading SystemID record")?;
    println!("{}", dump::render(&record, format)?);
    Ok(crc::verify(&record))
}
