//! Field arguments shared by `init` and `update`.

use anyhow::{Context, Result};
use clap::Args;
use systemid_core::{Record, MAC_CAPACITY};

/// A `--mac <N>=<ADDR>` argument. `slot` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacArg {
    pub slot: usize,
    pub address: String,
}

/// Parse `<N>=<ADDR>` with `N` in `1..=MAC_CAPACITY`.
pub fn parse_mac_arg(s: &str) -> std::result::Result<MacArg, String> {
    let (slot, address) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <N>=<ADDR>, got '{s}'"))?;
    let slot: usize = slot
        .trim()
        .parse()
        .map_err(|_| format!("invalid MAC slot '{slot}'"))?;
    if !(1..=MAC_CAPACITY).contains(&slot) {
        return Err(format!("MAC slot must be 1..={MAC_CAPACITY}, got {slot}"));
    }
    Ok(MacArg {
        slot: slot - 1,
        address: address.to_string(),
    })
}

/// Fields an operator can set.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Hardware revision: v<major>.<minor>[.<errata>]
    #[arg(short = 'r', long = "hw-rev")]
    pub hw_rev: Option<String>,
    /// Serial number (up to 10 characters)
    #[arg(short = 's', long = "sn")]
    pub serial: Option<String>,
    /// MAC address for slot N (1-based): N=AA:BB:CC:DD:EE:FF. Repeatable.
    #[arg(long = "mac", value_name = "N=ADDR", value_parser = parse_mac_arg)]
    pub macs: Vec<MacArg>,
}

impl FieldArgs {
    /// Apply the given fields in a fixed order: serial, revision, MACs.
    ///
    /// Empty serial and revision strings are skipped.
    pub fn apply(&self, record: &mut Record) -> Result<()> {
        if let Some(serial) = self.serial.as_deref().filter(|s| !s.is_empty()) {
            record.set_serial(serial);
        }
        if let Some(rev) = self.hw_rev.as_deref().filter(|s| !s.is_empty()) {
            record.set_hw_revision(rev);
        }
        for mac in &self.macs {
            record
                .set_mac(mac.slot, &mac.address)
                .with_context(|| format!("setting mac{}", mac.slot + 1))?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.hw_rev.is_none() && self.serial.is_none() && self.macs.is_empty()
    }
}
