//! `systemid.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use systemid_nvmem::{resolve_device_path, DEFAULT_DEVICE_BASE, DEFAULT_DEVICE_NAME};

use crate::dump::OutputFormat;

/// Top-level configuration. Every section and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemIdConfig {
    /// Which EEPROM to use.
    #[serde(default)]
    pub device: DeviceConfig,
    /// Dump rendering.
    #[serde(default)]
    pub output: OutputConfig,
    /// Log filtering.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Device section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Full path of the device file. Takes precedence over `base`/`name`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// nvmem device directory.
    #[serde(default)]
    pub base: Option<PathBuf>,
    /// nvmem device name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Output section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Logging section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. "info" or "systemid_core=debug".
    #[serde(default)]
    pub level: Option<String>,
}

impl SystemIdConfig {
    pub const FILE_NAME: &'static str = "systemid.toml";

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Search upward from `start_dir` for `systemid.toml`, returning the parsed
    /// configuration and the file it came from.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(Self::FILE_NAME);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing systemid.toml")
    }

    /// Device file to use: `explicit` if given, then the configured path, then
    /// `<base>/<name>/nvmem` with the built-in defaults filling gaps.
    pub fn device_path(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Some(path) = &self.device.path {
            return path.clone();
        }
        let base = self
            .device
            .base
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DEVICE_BASE));
        let name = self.device.name.as_deref().unwrap_or(DEFAULT_DEVICE_NAME);
        resolve_device_path(base, name)
    }
}
