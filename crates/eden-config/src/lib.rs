//! Eden controller configuration for Meridian.
//!
//! Eden keeps its input settings in the `[Controls]` section of
//! `user/config/qt-config.ini`, one `player_<i>_<field>` key per input. This
//! crate converts launcher binding models into those keys and patches them
//! into the file without disturbing anything else in it.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod adapter;
pub mod controls;
pub mod error;
pub mod ini;
pub mod reconcile;

pub use adapter::{convert_player, convert_players, eden_index};
pub use controls::ControlSet;
pub use error::{EdenError, Result};
pub use ini::{CONTROLS_SECTION, patch_controls, read_controls, resolve_config_path};
pub use reconcile::{ConfigureReport, configure_input, controls_for_snapshot};
