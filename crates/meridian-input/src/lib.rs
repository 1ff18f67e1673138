//! Emulator-agnostic controller binding model.
//!
//! Meridian collects one [`BindingModel`] per player from its settings UI and
//! hands a [`PlayerSnapshot`] of all of them to the per-emulator writers.
//!
//! - [`model`]: the typed binding model and its closed enums
//! - [`value`]: the `Button n` / `Axis n±` / `Hat n dir` raw value notation
//! - [`snapshot`]: tolerant decoding of the launcher's JSON player settings
//! - [`device`]: the device-resolution collaborator interface
//!
//! Nothing here touches the filesystem.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod device;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod value;

pub use device::{
    DeviceResolver, EnumeratedDevice, EnumeratedDevices, NoDeviceResolver, ResolvedDevice,
    split_device_label,
};
pub use error::SnapshotError;
pub use model::{BindingModel, ControllerType, InputApi};
pub use snapshot::PlayerSnapshot;
pub use value::{AxisDirection, HatDirection, RawBinding, is_unbound_value};
