//! Cemu profile repository commands

use anyhow::{Context, Result};
use meridian_cemu::{ProfileRepository, STANDARD_TABLES, extract_bindings};

use crate::commands::ProfileCommands;
use crate::error::CliError;
use crate::output;

/// Execute profile command
pub fn execute(cmd: &ProfileCommands, json: bool) -> Result<()> {
    match cmd {
        ProfileCommands::List { cemu_dir } => {
            let names = ProfileRepository::new(cemu_dir).list_profiles()?;
            output::print_profile_list(&names, json);
            Ok(())
        }
        ProfileCommands::Show { name, cemu_dir } => {
            let profile = ProfileRepository::new(cemu_dir).load_profile(name)?;
            output::print_profile(&profile, json);
            Ok(())
        }
        ProfileCommands::Bindings { name, cemu_dir } => {
            let profile = ProfileRepository::new(cemu_dir).load_profile(name)?;
            let bindings = extract_bindings(&profile, &STANDARD_TABLES);
            output::print_bindings(name, &bindings, json);
            Ok(())
        }
        ProfileCommands::Import {
            file,
            name,
            cemu_dir,
        } => {
            let profile = ProfileRepository::new(cemu_dir)
                .import_profile(file, name.as_deref())
                .with_context(|| format!("Failed to import {}", file.display()))?;
            output::print_success(
                &format!("Imported profile {}", profile.profile_name),
                json,
            );
            Ok(())
        }
        ProfileCommands::Delete { name, cemu_dir } => {
            if !ProfileRepository::new(cemu_dir).delete_profile(name)? {
                return Err(CliError::ProfileNotFound(name.clone()).into());
            }
            output::print_success(&format!("Deleted profile {name}"), json);
            Ok(())
        }
    }
}
