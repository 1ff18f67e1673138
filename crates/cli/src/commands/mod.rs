//! Command implementations for meridianctl

pub mod configure;
pub mod controls;
pub mod profile;
pub mod slot;

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List profiles in controllerProfiles/
    List {
        /// Cemu installation directory
        #[arg(long)]
        cemu_dir: PathBuf,
    },

    /// Show a profile's controller settings
    Show {
        /// Profile name, without .xml
        name: String,
        /// Cemu installation directory
        #[arg(long)]
        cemu_dir: PathBuf,
    },

    /// Show a profile's mappings as logical bindings
    Bindings {
        /// Profile name, without .xml
        name: String,
        /// Cemu installation directory
        #[arg(long)]
        cemu_dir: PathBuf,
    },

    /// Import a profile file into the repository
    Import {
        /// Profile XML to import
        file: PathBuf,
        /// Name to store it under (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
        /// Cemu installation directory
        #[arg(long)]
        cemu_dir: PathBuf,
    },

    /// Delete a profile
    Delete {
        /// Profile name, without .xml
        name: String,
        /// Cemu installation directory
        #[arg(long)]
        cemu_dir: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum SlotCommands {
    /// Show the profile active in a controller slot
    Show {
        /// Slot number, 0-7
        slot: u32,
        /// Cemu installation directory
        #[arg(long)]
        cemu_dir: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ControlsCommands {
    /// Show the [Controls] section of qt-config.ini
    Show {
        /// Eden installation directory
        #[arg(long)]
        eden_dir: PathBuf,
        /// Only keys of this 0-based player
        #[arg(short, long)]
        player: Option<u8>,
    },
}
