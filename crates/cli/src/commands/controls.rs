//! Eden `[Controls]` inspection

use anyhow::{Context, Result};
use meridian_eden::{ControlSet, read_controls, resolve_config_path};

use crate::commands::ControlsCommands;
use crate::output;

/// Execute controls command
pub fn execute(cmd: &ControlsCommands, json: bool) -> Result<()> {
    match cmd {
        ControlsCommands::Show { eden_dir, player } => {
            let path = resolve_config_path(eden_dir);
            let controls = read_controls(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let controls = match player {
                Some(index) => player_controls(&controls, *index),
                None => controls,
            };
            output::print_controls(&path, &controls, json);
            Ok(())
        }
    }
}

/// Keys belonging to `player_<index>_`.
fn player_controls(controls: &ControlSet, index: u8) -> ControlSet {
    let prefix = format!("player_{index}_");
    controls
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .collect()
}
