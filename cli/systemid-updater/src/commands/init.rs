//! `systemid-updater init`: start from an empty record.

use anyhow::{Context, Result};
use systemid_core::{lifecycle, Clock, Record, Storage};

use super::fields::FieldArgs;
use super::{finish, OutputOptions};

/// Build a fresh record dated from `clock`, apply `fields`, then dump and
/// write as requested. Whatever the device held before is discarded.
pub fn run(
    storage: &impl Storage,
    clock: &impl Clock,
    hw_mac: bool,
    fields: &FieldArgs,
    out: &OutputOptions,
) -> Result<Record> {
    let record = lifecycle::initialize_from(clock, storage, hw_mac)
        .context("initializing SystemID record")?;
    finish(record, storage, fields, out)
}
