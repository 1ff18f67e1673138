//! One configuration pass over a Cemu installation
//!
//! For every player in the snapshot the pass either writes a named profile
//! plus its slot file, or clears both when the player has nothing to write.
//! Slot files Cemu or the user paired with a real device keep that pairing;
//! only the mappings are replaced.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use meridian_input::PlayerSnapshot;
use tracing::{debug, info, warn};

use crate::adapter::{ConversionContext, convert_players};
use crate::error::Result;
use crate::models::{AxisSettings, CONTROLLER_APIS, CemuProfile, ControllerEntry, GameAssignment};
use crate::repository::{MAX_SLOT, ProfileRepository};
use crate::title_id::resolve_title_id;

/// Inputs of a configuration pass besides the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigureOptions<'a> {
    /// Conversion tables, resolver and naming
    pub conversion: ConversionContext<'a>,
    /// Game being launched; enables the per-title assignment
    pub game_path: Option<&'a Path>,
}

/// What a configuration pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureReport {
    /// Player number to the profile name written for it
    pub written: BTreeMap<u8, String>,
    /// Players whose slot and profile were cleared
    pub cleared: Vec<u8>,
    /// Players whose update failed; details are logged
    pub failed: Vec<u8>,
    /// Game profile written, if any
    pub game_profile: Option<PathBuf>,
}

/// Slot for 1-based `player`, if Cemu has one.
pub fn player_slot(player: u8) -> Option<u32> {
    u32::from(player)
        .checked_sub(1)
        .filter(|slot| *slot <= MAX_SLOT)
}

/// Combine a freshly converted profile with the one already in its slot.
///
/// When `existing` has a controller with a real device pairing under a known
/// API, its API, device identity, rumble and axis settings are kept while the
/// mappings, motion flag, emulated type and profile name come from `fresh`.
/// Kept axis groups that are out of range are taken from `fresh` instead.
/// Otherwise `fresh` is returned unchanged.
pub fn merge_with_existing(existing: Option<&CemuProfile>, fresh: CemuProfile) -> CemuProfile {
    let Some(old) = existing
        .and_then(CemuProfile::first_controller)
        .filter(|c| c.has_device_pairing() && CONTROLLER_APIS.contains(&c.api.as_str()))
    else {
        return fresh;
    };
    let Some(new) = fresh.first_controller() else {
        return fresh;
    };

    let prefer_old = |old: &str, new: &str| {
        if old.is_empty() { new } else { old }.to_string()
    };
    let merged = ControllerEntry {
        api: old.api.clone(),
        uuid: old.uuid.clone(),
        display_name: prefer_old(&old.display_name, &new.display_name),
        product_guid: prefer_old(&old.product_guid, &new.product_guid),
        rumble: old.rumble,
        motion: new.motion,
        axis: valid_or(old.axis, new.axis, "axis"),
        rotation: valid_or(old.rotation, new.rotation, "rotation"),
        trigger: valid_or(old.trigger, new.trigger, "trigger"),
        mappings: new.mappings.clone(),
    };

    CemuProfile {
        emulated_type: fresh.emulated_type,
        profile_name: fresh.profile_name,
        controllers: vec![merged],
    }
}

fn valid_or(old: AxisSettings, fresh: AxisSettings, group: &'static str) -> AxisSettings {
    match old.validate(group) {
        Ok(()) => old,
        Err(err) => {
            debug!(%err, "Replacing out-of-range axis settings");
            fresh
        }
    }
}

/// Run a configuration pass for the Cemu executable at `exe_path`.
///
/// Per-player failures are logged and reported without aborting the pass.
/// Players absent from `snapshot` are left untouched.
pub fn configure_input(
    snapshot: &PlayerSnapshot,
    exe_path: &Path,
    options: &ConfigureOptions<'_>,
) -> ConfigureReport {
    let cemu_dir = exe_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let repo = ProfileRepository::new(cemu_dir);
    let ctx = &options.conversion;
    let mut report = ConfigureReport::default();

    let profiles = convert_players(snapshot, ctx);
    for (player, profile) in profiles {
        let Some(slot) = player_slot(player) else {
            warn!(player, "Player has no Cemu controller slot");
            continue;
        };
        match write_player(&repo, slot, profile) {
            Ok(profile) => {
                debug!(
                    player,
                    slot,
                    profile = %profile.profile_name,
                    api = profile.first_controller().map_or("?", |c| c.api.as_str()),
                    uuid = profile.first_controller().map_or("?", |c| c.uuid.as_str()),
                    "Player configured"
                );
                report.written.insert(player, profile.profile_name);
            }
            Err(err) => {
                warn!(player, slot, error = %err, "Failed to write Cemu profile");
                report.failed.push(player);
            }
        }
    }

    for (player, _) in snapshot.iter() {
        if report.written.contains_key(&player) || report.failed.contains(&player) {
            continue;
        }
        let Some(slot) = player_slot(player) else {
            continue;
        };
        match clear_player(&repo, slot, &ctx.profile_name(player)) {
            Ok(()) => report.cleared.push(player),
            Err(err) => {
                warn!(player, slot, error = %err, "Failed to clear Cemu slot");
                report.failed.push(player);
            }
        }
    }

    if let Some(game_path) = options.game_path
        && !report.written.is_empty()
    {
        report.game_profile = assign_game(&repo, game_path, &report.written);
    }

    info!(
        written = report.written.len(),
        cleared = report.cleared.len(),
        failed = report.failed.len(),
        "Cemu configuration pass complete"
    );
    report
}

fn write_player(repo: &ProfileRepository, slot: u32, fresh: CemuProfile) -> Result<CemuProfile> {
    let existing = match repo.load_slot(slot) {
        Ok(existing) => existing,
        Err(err) => {
            debug!(slot, error = %err, "Existing slot file unusable, overwriting");
            None
        }
    };
    let merged = merge_with_existing(existing.as_ref(), fresh);
    repo.save_profile(&merged, None)?;
    repo.activate_slot(&merged, slot)?;
    Ok(merged)
}

fn clear_player(repo: &ProfileRepository, slot: u32, profile_name: &str) -> Result<()> {
    repo.deactivate_slot(slot)?;
    repo.delete_profile(profile_name)?;
    Ok(())
}

fn assign_game(
    repo: &ProfileRepository,
    game_path: &Path,
    written: &BTreeMap<u8, String>,
) -> Option<PathBuf> {
    let Some(title_id) = resolve_title_id(game_path, repo.cemu_dir()) else {
        debug!(game = ?game_path, "No title id for game, skipping assignment");
        return None;
    };
    let assignment = GameAssignment {
        title_id,
        player_to_profile: written.clone(),
    };
    match repo.apply_game_assignment(&assignment) {
        Ok(path) => Some(path),
        Err(err) => {
            warn!(title_id = %assignment.title_id, error = %err, "Failed to assign game profile");
            None
        }
    }
}
