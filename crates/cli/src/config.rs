//! meridianctl configuration file
//!
//! Optional YAML, looked up from `--config` / `MERIDIAN_CONFIG`, then
//! `<config dir>/meridian/meridianctl.yaml`. A missing default file means
//! defaults; a missing explicit file is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use meridian_cemu::DEFAULT_PROFILE_PREFIX;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

/// Emulator a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emulator {
    Cemu,
    Eden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Prefix of generated Cemu profile names
    pub profile_name_prefix: String,
    /// Emulator used when `configure` has no `--emulator`
    pub default_emulator: Option<Emulator>,
    /// `tracing` filter used when neither `RUST_LOG` nor `-v` is given
    pub log_filter: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            profile_name_prefix: DEFAULT_PROFILE_PREFIX.to_string(),
            default_emulator: None,
            log_filter: None,
        }
    }
}

impl CliConfig {
    /// Load the configuration, explicitly named or from the default location.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = ?path, "Loaded configuration");
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text).map_err(CliError::from)?;
        if config.profile_name_prefix.trim().is_empty() {
            return Err(CliError::InvalidConfiguration(
                "profile_name_prefix must not be empty".to_string(),
            )
            .into());
        }
        Ok(config)
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("meridian").join("meridianctl.yaml"))
}
