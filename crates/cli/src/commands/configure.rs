//! One configuration pass for a launching emulator

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use meridian_cemu::{ConfigureOptions, ConversionContext};
use meridian_input::PlayerSnapshot;
use tracing::{info, warn};

use crate::config::{CliConfig, Emulator};
use crate::error::CliError;
use crate::output;

/// Arguments of `meridianctl configure`
#[derive(Debug)]
pub struct ConfigureArgs<'a> {
    pub emulator: Option<Emulator>,
    pub exe: &'a Path,
    pub players: &'a Path,
    pub game: Option<&'a Path>,
}

/// Execute configure command
pub fn execute(args: &ConfigureArgs<'_>, config: &CliConfig, json: bool) -> Result<()> {
    let emulator = args.emulator.or(config.default_emulator).ok_or_else(|| {
        CliError::InvalidInput(
            "No emulator given; pass --emulator or set default_emulator".to_string(),
        )
    })?;
    let snapshot = load_snapshot(args.players)?;
    info!(?emulator, players = snapshot.len(), "Configuring emulator input");

    match emulator {
        Emulator::Cemu => configure_cemu(&snapshot, args, config, json),
        Emulator::Eden => configure_eden(&snapshot, args.exe, json),
    }
}

fn load_snapshot(path: &Path) -> Result<PlayerSnapshot> {
    let text = fs::read_to_string(path)
        .map_err(CliError::from)
        .with_context(|| format!("Failed to read players file {}", path.display()))?;
    PlayerSnapshot::from_json_str(&text)
        .with_context(|| format!("Invalid players file {}", path.display()))
}

fn configure_cemu(
    snapshot: &PlayerSnapshot,
    args: &ConfigureArgs<'_>,
    config: &CliConfig,
    json: bool,
) -> Result<()> {
    let options = ConfigureOptions {
        conversion: ConversionContext::default().with_name_prefix(&config.profile_name_prefix),
        game_path: args.game,
    };
    let report = meridian_cemu::configure_input(snapshot, args.exe, &options);
    if !report.failed.is_empty() {
        warn!(failed = ?report.failed, "Some players could not be written");
    }
    output::print_cemu_report(&report, json);
    Ok(())
}

fn configure_eden(snapshot: &PlayerSnapshot, exe: &Path, json: bool) -> Result<()> {
    let report = meridian_eden::configure_input(snapshot, exe)
        .context("Failed to write Eden controls")?;
    output::print_eden_report(&report, json);
    Ok(())
}
