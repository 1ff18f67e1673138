//! Cemu controller profiles for Meridian.
//!
//! Cemu stores one XML file per emulated controller: named profiles under
//! `controllerProfiles/`, the active assignment of slot `n` as
//! `controller{n}.xml`, and per-title assignments under `gameProfiles/`.
//! This crate converts launcher [`meridian_input::BindingModel`]s into those
//! files and back.
//!
//! # Layout
//!
//! - [`models`]: profile types and their invariants
//! - [`buttons`]: the `Buttons2` input code space
//! - [`tables`]: logical name / mapping id / API lookup tables
//! - [`correction`]: per-device fixes for misreported inputs
//! - [`xml`]: tolerant reader and canonical writer for profile XML
//! - [`adapter`]: binding model to profile conversion
//! - [`repository`]: profile, slot and game profile files
//! - [`reconcile`]: a whole configuration pass over an installation
//!
//! Every write goes through [`meridian_storage::write_atomic`], so Cemu never
//! observes a half-written file.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod adapter;
pub mod buttons;
pub mod correction;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod repository;
pub mod tables;
pub mod title_id;
pub mod xml;

pub use adapter::{
    ConversionContext, DEFAULT_PROFILE_PREFIX, convert_player, convert_players, extract_bindings,
};
pub use correction::{DUALSENSE_DIRECTINPUT, DeviceCorrection};
pub use error::{CemuError, Result, ValidationError};
pub use models::{AxisSettings, CemuProfile, ControllerEntry, EmulatedType, GameAssignment, MappingSet};
pub use reconcile::{ConfigureOptions, ConfigureReport, configure_input, merge_with_existing};
pub use repository::{MAX_SLOT, ProfileRepository, is_valid_profile_name, sanitize_profile_name};
pub use tables::{BindingTables, STANDARD_TABLES};
pub use title_id::resolve_title_id;
pub use xml::{parse_profile, to_xml};
