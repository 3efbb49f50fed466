//! Human-readable and JSON rendering of a record.

use std::fmt::Write as _;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use systemid_core::{crc, Record};

/// How dumps are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Hex dump followed by the decoded fields.
    #[default]
    Text,
    /// Decoded fields as a JSON object.
    Json,
}

/// Decoded fields of a record, as shown to the operator.
#[derive(Debug, Serialize)]
pub struct RecordView {
    pub tag: String,
    pub hw_rev: String,
    pub major: u8,
    pub minor: u8,
    pub errata: String,
    pub serial: String,
    pub build_date: String,
    pub mac_flags: String,
    pub mac_count: u8,
    pub macs: Vec<String>,
    pub crc: String,
    pub crc_valid: bool,
}

impl RecordView {
    pub fn new(record: &Record, crc_valid: bool) -> Self {
        RecordView {
            tag: record.tag_str(),
            hw_rev: hw_rev(record),
            major: record.major,
            minor: record.minor,
            errata: record.errata_str(),
            serial: record.serial_str(),
            build_date: record.date.to_string(),
            mac_flags: format!("{:02X}", record.mac_flags),
            mac_count: record.mac_count,
            macs: record.macs().iter().map(ToString::to_string).collect(),
            crc: format!("{:08X}", record.checksum),
            crc_valid,
        }
    }
}

fn hw_rev(record: &Record) -> String {
    if record.has_errata() {
        let [a, b] = record.errata;
        format!(
            "v{}.{}.{}{}",
            record.major,
            record.minor,
            printable(a),
            printable(b)
        )
    } else {
        format!("v{}.{}", record.major, record.minor)
    }
}

fn printable(b: u8) -> char {
    if b.is_ascii_graphic() || b == b' ' {
        b as char
    } else {
        '.'
    }
}

/// Classic 16 bytes per row dump with an ASCII column.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let _ = write!(out, "{:02X}: ", row * 16);
        for b in chunk {
            let _ = write!(out, "{b:02X} ");
        }
        for _ in chunk.len()..16 {
            out.push_str("   ");
        }
        out.push_str("| ");
        out.extend(chunk.iter().map(|&b| printable(b)));
        out.push('\n');
    }
    out
}

/// Field listing in the layout order.
pub fn summary(view: &RecordView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "TagID: {}", view.tag);
    let _ = writeln!(out, "hw_rev: {}", view.hw_rev);
    let _ = writeln!(out, "serialnumber: {}", view.serial);
    let _ = writeln!(out, "build date: {}", view.build_date);
    let _ = writeln!(out, "mac flags: {}", view.mac_flags);
    for (i, mac) in view.macs.iter().enumerate() {
        let _ = writeln!(out, "mac{}: {mac}", i + 1);
    }
    let _ = writeln!(out, "CRC: {}", view.crc);
    out
}

/// Render a record. A record that fails its CRC check gets the raw dump and
/// the mismatch, not the decoded fields.
pub fn render(record: &Record, format: OutputFormat) -> Result<String> {
    let valid = crc::check(record);
    match format {
        OutputFormat::Json => {
            let view = RecordView::new(record, valid.is_ok());
            Ok(serde_json::to_string_pretty(&view)?)
        }
        OutputFormat::Text => {
            let mut out = hex_dump(&record.encode());
            out.push_str("check EEPROM:\n");
            match valid {
                Ok(()) => out.push_str(&summary(&RecordView::new(record, true))),
                Err(e) => {
                    let _ = writeln!(out, "{e}");
                }
            }
            Ok(out)
        }
    }
}
