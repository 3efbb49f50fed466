//! `systemid-updater update`: change fields of the stored record.

use anyhow::{Context, Result};
use systemid_core::{crc, lifecycle, Record, Storage};

use super::fields::FieldArgs;
use super::{finish, OutputOptions};
use crate::dump;

/// Load the stored record, apply `fields`, then dump and write as requested.
///
/// The stored CRC is checked but a mismatch only warns: re-stamping after the
/// edit is how a damaged record gets repaired.
pub fn run(storage: &impl Storage, fields: &FieldArgs, out: &OutputOptions) -> Result<Record> {
    let record = lifecycle::load(storage).context("loading SystemID record")?;

    if out.check && out.verbose > 0 {
        println!("{}", dump::render(&record, out.format)?);
    } else if !crc::verify(&record) {
        tracing::warn!("stored record is not valid, it will be re-stamped");
    }

    if fields.is_empty() {
        tracing::info!("no fields given, record is only re-stamped");
    }

    finish(record, storage, fields, out)
}
