//! systemid-updater: set up, update or read the SystemID EEPROM.
//!
//! The record layout follows NXP application note AN3638.

mod commands;
mod config;
mod dump;
mod logging;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use systemid_core::SystemClock;
use systemid_nvmem::NvmemDevice;

use commands::fields::FieldArgs;
use commands::OutputOptions;
use config::SystemIdConfig;
use dump::OutputFormat;

#[derive(Parser)]
#[command(
    name = "systemid-updater",
    version,
    about = "Set up, update or read the SystemID EEPROM"
)]
struct Cli {
    /// Configuration file (default: systemid.toml, searched upward from the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Be verbose (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Dump format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the record's CRC and dump its content
    Check {
        /// EEPROM device or image file
        device: Option<PathBuf>,
    },
    /// Start with an empty record (overwrites everything)
    Init {
        /// EEPROM device or image file
        device: Option<PathBuf>,
        /// Install the read-only hardware MAC address as mac1
        #[arg(long)]
        hw_mac: bool,
        #[command(flatten)]
        fields: FieldArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Update fields of the current record
    Update {
        /// EEPROM device or image file
        device: Option<PathBuf>,
        #[command(flatten)]
        fields: FieldArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Write the record to the device
    #[arg(short, long)]
    write: bool,
    /// Dump the resulting record
    #[arg(short, long)]
    check: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(cli.config.as_deref(), &cwd)?;
    logging::setup_logging(cli.verbose, config.logging.level.as_deref())?;

    let format = cli.format.or(config.output.format).unwrap_or_default();
    let options = |output: OutputArgs| OutputOptions {
        check: output.check,
        write: output.write,
        verbose: cli.verbose,
        format,
    };

    match cli.command {
        Commands::Check { device } => {
            let storage = NvmemDevice::new(config.device_path(device.as_deref()));
            tracing::debug!("device {}", storage.path().display());
            // a mismatch is already in the dump and the log
            commands::check::run(&storage, format)?;
            Ok(())
        }

        Commands::Init {
            device,
            hw_mac,
            fields,
            output,
        } => {
            let storage = NvmemDevice::new(config.device_path(device.as_deref()));
            tracing::debug!("device {}", storage.path().display());
            commands::init::run(&storage, &SystemClock, hw_mac, &fields, &options(output))?;
            Ok(())
        }

        Commands::Update {
            device,
            fields,
            output,
        } => {
            let storage = NvmemDevice::new(config.device_path(device.as_deref()));
            tracing::debug!("device {}", storage.path().display());
            commands::update::run(&storage, &fields, &options(output))?;
            Ok(())
        }
    }
}

/// Use the explicit config file if given, else search for one. No file at all
/// means defaults.
fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<SystemIdConfig> {
    if let Some(path) = explicit {
        return SystemIdConfig::load(path);
    }
    Ok(SystemIdConfig::find_and_load(cwd)?
        .map(|(config, _)| config)
        .unwrap_or_default())
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::fs;
    use systemid_core::{crc, lifecycle, FixedClock, Record, RECORD_SIZE};
    use time::macros::datetime;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("systemid-updater").chain(args.iter().copied()))
            .unwrap()
    }

    /// Full workflow on an image file: init with the hardware MAC, update, check.
    #[test]
    fn init_update_check_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eeprom.bin");
        let mut image = vec![0xFFu8; 256];
        image[0xFA..].copy_from_slice(&[0x00, 0x04, 0xA3, 0x0A, 0x0B, 0x0C]);
        fs::write(&path, &image).unwrap();
        let device = NvmemDevice::new(&path);
        let write = OutputOptions {
            write: true,
            ..OutputOptions::default()
        };

        // 1. Init
        let clock = FixedClock(datetime!(2022-02-22 22:22:22 UTC));
        let fields = FieldArgs {
            serial: Some("GM00000001".to_string()),
            ..FieldArgs::default()
        };
        commands::init::run(&device, &clock, true, &fields, &write).unwrap();

        // 2. Update
        let cli = parse(&["update", "-r", "v1.0.rc", "--mac", "2=de:ad:be:ef:00:01", "-w"]);
        let Commands::Update { fields, .. } = cli.command else {
            panic!("expected update");
        };
        commands::update::run(&device, &fields, &write).unwrap();

        // 3. Check
        assert!(commands::check::run(&device, OutputFormat::Text).unwrap());

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 256);
        assert_eq!(&bytes[0xFA..], &image[0xFA..]);
        let record = Record::decode(&bytes[..RECORD_SIZE]).unwrap();
        assert!(crc::verify(&record));
        assert_eq!(record.serial_str(), "GM00000001");
        assert_eq!((record.major, record.minor), (1, 0));
        assert_eq!(record.errata_str(), "rc");
        assert_eq!(record.date.to_string(), "22.02.2022 22:22:22");
        assert_eq!(record.mac_count, 2);
        assert_eq!(record.macs()[0].to_string(), "00:04:A3:0A:0B:0C");
        assert_eq!(record.macs()[1].to_string(), "DE:AD:BE:EF:00:01");
    }

    #[test]
    fn update_without_write_is_dry_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eeprom.bin");
        let mut record = Record::zeroed();
        fs::write(&path, lifecycle::finalize(&mut record)).unwrap();
        let before = fs::read(&path).unwrap();

        let cli = parse(&["update", "--sn", "CHANGED", "-c"]);
        let Commands::Update { fields, output, .. } = cli.command else {
            panic!("expected update");
        };
        assert!(output.check);
        assert!(!output.write);
        let out = OutputOptions {
            check: output.check,
            write: output.write,
            ..OutputOptions::default()
        };
        commands::update::run(&NvmemDevice::new(&path), &fields, &out).unwrap();
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn check_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eeprom.bin");
        fs::write(&path, vec![0u8; RECORD_SIZE]).unwrap();
        assert!(!commands::check::run(&NvmemDevice::new(&path), OutputFormat::Json).unwrap());
    }

    #[test]
    fn cli_parses_original_style_flags() {
        let cli = parse(&[
            "-vv",
            "init",
            "/tmp/eeprom",
            "--hw-mac",
            "-s",
            "SN1",
            "--hw-rev",
            "v2.5.AB",
            "--mac",
            "1=aa:bb:cc:dd:ee:ff",
            "--mac",
            "2=01:02",
            "-w",
            "-c",
            "--format",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        let Commands::Init {
            device,
            hw_mac,
            fields,
            output,
        } = cli.command
        else {
            panic!("expected init");
        };
        assert_eq!(device.as_deref(), Some(Path::new("/tmp/eeprom")));
        assert!(hw_mac);
        assert_eq!(fields.serial.as_deref(), Some("SN1"));
        assert_eq!(fields.hw_rev.as_deref(), Some("v2.5.AB"));
        assert_eq!(fields.macs.len(), 2);
        assert_eq!(fields.macs[1].slot, 1);
        assert!(output.write && output.check);
    }

    #[test]
    fn cli_rejects_out_of_range_mac_slot() {
        let args = ["systemid-updater", "update", "--mac", "0=aa:bb"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn cli_requires_a_command() {
        assert!(Cli::try_parse_from(["systemid-updater"]).is_err());
    }

    #[test]
    fn explicit_config_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("custom.toml");
        fs::write(&cfg, "[device]\npath = \"/data/eeprom\"\n").unwrap();
        let config = load_config(Some(&cfg), dir.path()).unwrap();
        assert_eq!(config.device_path(None), PathBuf::from("/data/eeprom"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.toml")), dir.path()).is_err());
    }
}
