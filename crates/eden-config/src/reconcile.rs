//! One configuration pass over an Eden installation

use std::path::{Path, PathBuf};

use meridian_input::PlayerSnapshot;
use tracing::{debug, info, warn};

use crate::adapter::{convert_players, eden_index};
use crate::controls::ControlSet;
use crate::error::Result;
use crate::ini::{patch_controls, resolve_config_path};

/// What a configuration pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureReport {
    /// Eden indices written as connected
    pub configured: Vec<u8>,
    /// Eden indices marked disconnected
    pub disconnected: Vec<u8>,
    /// Config file written; `None` when there was nothing to write
    pub config_path: Option<PathBuf>,
}

/// All `[Controls]` updates for `snapshot`: the entries of every configured
/// player, and `connected=false` for players present but inactive.
pub fn controls_for_snapshot(snapshot: &PlayerSnapshot) -> (ControlSet, ConfigureReport) {
    let mut updates = ControlSet::new();
    let mut report = ConfigureReport::default();

    for (index, entries) in convert_players(snapshot) {
        debug!(eden_index = index, keys = entries.len(), "Player converted");
        updates.extend(entries);
        report.configured.push(index);
    }

    for (player, _) in snapshot.iter() {
        let Some(index) = eden_index(player) else {
            warn!(player, "Player has no Eden slot");
            continue;
        };
        if report.configured.contains(&index) {
            continue;
        }
        let prefix = format!("player_{index}");
        updates.insert(format!("{prefix}_connected\\default"), "false");
        updates.insert(format!("{prefix}_connected"), "false");
        report.disconnected.push(index);
    }

    (updates, report)
}

/// Run a configuration pass for the Eden executable at `exe_path`.
///
/// Every update lands in a single patch of `qt-config.ini`; when there is
/// nothing to update the file is not touched.
///
/// # Errors
///
/// Returns [`crate::EdenError::Storage`] if the config file cannot be read or
/// replaced.
pub fn configure_input(snapshot: &PlayerSnapshot, exe_path: &Path) -> Result<ConfigureReport> {
    let eden_dir = exe_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let (updates, mut report) = controls_for_snapshot(snapshot);

    if updates.is_empty() {
        debug!("No Eden control entries to write");
        return Ok(report);
    }

    let config_path = resolve_config_path(eden_dir);
    patch_controls(&config_path, &updates)?;
    info!(
        path = ?config_path,
        keys = updates.len(),
        configured = report.configured.len(),
        disconnected = report.disconnected.len(),
        "Eden configuration pass complete"
    );
    report.config_path = Some(config_path);
    Ok(report)
}
