//! Cemu controller slot commands

use anyhow::{Context, Result};
use meridian_cemu::ProfileRepository;

use crate::commands::SlotCommands;
use crate::output;

/// Execute slot command
pub fn execute(cmd: &SlotCommands, json: bool) -> Result<()> {
    match cmd {
        SlotCommands::Show { slot, cemu_dir } => {
            let profile = ProfileRepository::new(cemu_dir)
                .load_slot(*slot)
                .with_context(|| format!("Failed to read slot {slot}"))?;
            output::print_slot(*slot, profile.as_ref(), json);
            Ok(())
        }
    }
}
