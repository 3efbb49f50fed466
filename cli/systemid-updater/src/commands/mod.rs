//! CLI command implementations.

pub mod check;
pub mod fields;
pub mod init;
pub mod update;

use anyhow::{Context, Result};
use systemid_core::{crc, lifecycle, Record, Storage};

use crate::dump::{self, OutputFormat};
use fields::FieldArgs;

/// What to do with a record once it is built.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Dump the record.
    pub check: bool,
    /// Store the record on the device.
    pub write: bool,
    /// Verbosity; with `check`, also dump the state before mutation.
    pub verbose: u8,
    pub format: OutputFormat,
}

/// Shared tail of `init` and `update`: apply fields, re-stamp, verify, dump
/// and write as requested.
pub(crate) fn finish(
    mut record: Record,
    storage: &impl Storage,
    fields: &FieldArgs,
    out: &OutputOptions,
) -> Result<Record> {
    fields.apply(&mut record)?;

    crc::stamp(&mut record);
    crc::check(&record).context("record failed verification after stamping")?;

    if out.check {
        println!("{}", dump::render(&record, out.format)?);
    }

    if out.write {
        lifecycle::persist(&mut record, storage).context("writing SystemID record")?;
    } else {
        tracing::info!("not writing record (pass --write to store it)");
    }

    Ok(record)
}
