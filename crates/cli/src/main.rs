//! meridianctl - Meridian controller configuration CLI
//!
//! Writes emulator controller configuration from a launcher player snapshot
//! and inspects what is already on disk.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod config;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::configure::ConfigureArgs;
use crate::commands::{ControlsCommands, ProfileCommands, SlotCommands};
use crate::config::{CliConfig, Emulator};
use crate::error::exit_status;

#[derive(Parser, Debug)]
#[command(name = "meridianctl")]
#[command(about = "Meridian controller configuration CLI - Write and inspect emulator input settings")]
#[command(version)]
#[command(long_about = "
meridianctl translates the launcher's per-player controller bindings into
Cemu controller profiles and Eden's qt-config.ini, and inspects the results.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file
    #[arg(long, global = true, env = "MERIDIAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write controller configuration for one emulator launch
    Configure {
        /// Target emulator
        #[arg(short, long, value_enum)]
        emulator: Option<Emulator>,
        /// Emulator executable
        #[arg(long)]
        exe: PathBuf,
        /// Player snapshot JSON from the launcher
        #[arg(long)]
        players: PathBuf,
        /// Game being launched, for per-title assignment
        #[arg(long)]
        game: Option<PathBuf>,
    },

    /// Cemu profile commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Cemu controller slot commands
    #[command(subcommand)]
    Slot(SlotCommands),

    /// Eden controls commands
    #[command(subcommand)]
    Controls(ControlsCommands),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `RUST_LOG` wins, then the config file's filter unless `-v` was given.
fn log_filter(verbose: u8, config: Option<&CliConfig>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let configured = config
        .and_then(|c| c.log_filter.as_deref())
        .filter(|_| verbose == 0);
    match configured.map(EnvFilter::try_new) {
        Some(Ok(filter)) => filter,
        _ => EnvFilter::new(verbosity_filter(verbose)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref());

    tracing_subscriber::registry()
        .with(log_filter(cli.verbose, config.as_ref().ok()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = config.and_then(|config| execute_command(&cli, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(exit_status(&e).code())
        }
    }
}

fn execute_command(cli: &Cli, config: &CliConfig) -> Result<()> {
    match &cli.command {
        Commands::Configure {
            emulator,
            exe,
            players,
            game,
        } => {
            let args = ConfigureArgs {
                emulator: *emulator,
                exe,
                players,
                game: game.as_deref(),
            };
            commands::configure::execute(&args, config, cli.json)
        }
        Commands::Profile(cmd) => commands::profile::execute(cmd, cli.json),
        Commands::Slot(cmd) => commands::slot::execute(cmd, cli.json),
        Commands::Controls(cmd) => commands::controls::execute(cmd, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}
