//! Device-family binding corrections
//!
//! Some controllers report a different layout through the launcher's capture
//! backend than Cemu sees through its own. A [`DeviceCorrection`] rewrites
//! decoded bindings for one device family before they are encoded.

use meridian_input::{HatDirection, RawBinding};

use crate::models::EmulatedType;

/// What an [`AxisRule`] does to a matching axis binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisAction {
    /// Replace the axis with a plain button.
    Button(u32),
    /// Move to another axis index, optionally flipping the sign.
    Remap {
        /// Target axis index
        axis: u32,
        /// Whether the direction is inverted
        flip: bool,
    },
}

/// Rewrite for axis bindings of specific logical controls on one axis.
#[derive(Debug, Clone, Copy)]
pub struct AxisRule {
    /// Logical control names the rule applies to
    pub bindings: &'static [&'static str],
    /// Axis index the captured value must use
    pub from_axis: u32,
    /// Replacement
    pub action: AxisAction,
}

/// Correction table for one device family under one API and emulated type.
#[derive(Debug, Clone, Copy)]
pub struct DeviceCorrection {
    /// Case-insensitive fragment of the device name
    pub name_fragment: &'static str,
    /// Cemu API string the correction is scoped to
    pub api: &'static str,
    /// Emulated type the correction is scoped to
    pub emulated_type: EmulatedType,
    /// Logical controls forced onto hat directions whatever was captured
    pub hat_bindings: &'static [(&'static str, HatDirection)],
    /// Axis rewrites; the first matching rule applies
    pub axis_rules: &'static [AxisRule],
    /// Button index remap; unlisted buttons are kept
    pub button_remap: &'static [(u32, u32)],
}

impl DeviceCorrection {
    /// Whether this correction covers the given device.
    pub fn applies_to(&self, api: &str, emulated_type: EmulatedType, device_name: &str) -> bool {
        self.api == api
            && self.emulated_type == emulated_type
            && device_name
                .to_lowercase()
                .contains(&self.name_fragment.to_lowercase())
    }

    /// Rewrite the binding of logical control `name`.
    ///
    /// `binding` is the decoded captured value, or `None` when it did not
    /// decode; forced hat bindings apply even then.
    pub fn apply(&self, name: &str, binding: Option<RawBinding>) -> Option<RawBinding> {
        if let Some((_, direction)) = self.hat_bindings.iter().find(|(n, _)| *n == name) {
            return Some(RawBinding::Hat {
                index: 0,
                direction: *direction,
            });
        }

        match binding? {
            RawBinding::Axis { index, direction } => {
                let rule = self
                    .axis_rules
                    .iter()
                    .find(|rule| rule.from_axis == index && rule.bindings.contains(&name));
                Some(match rule.map(|rule| rule.action) {
                    Some(AxisAction::Button(button)) => RawBinding::Button(button),
                    Some(AxisAction::Remap { axis, flip }) => RawBinding::Axis {
                        index: axis,
                        direction: if flip { direction.flipped() } else { direction },
                    },
                    None => RawBinding::Axis { index, direction },
                })
            }
            RawBinding::Button(button) => {
                let mapped = self
                    .button_remap
                    .iter()
                    .find(|(from, _)| *from == button)
                    .map_or(button, |(_, to)| *to);
                Some(RawBinding::Button(mapped))
            }
            hat @ RawBinding::Hat { .. } => Some(hat),
        }
    }
}

/// DualSense captured through DirectInput, emulated as a Pro Controller.
///
/// The launcher records the pad in SDL order while Cemu's DirectInput backend
/// sees the HID report layout: the d-pad is a hat, the triggers are buttons 6
/// and 7, the right stick sits on Z/RZ and both Y axes are inverted.
pub const DUALSENSE_DIRECTINPUT: DeviceCorrection = DeviceCorrection {
    name_fragment: "dualsense",
    api: "DirectInput",
    emulated_type: EmulatedType::ProController,
    hat_bindings: &[
        ("dp_up", HatDirection::Up),
        ("dp_down", HatDirection::Down),
        ("dp_left", HatDirection::Left),
        ("dp_right", HatDirection::Right),
    ],
    axis_rules: &[
        AxisRule {
            bindings: &["zl"],
            from_axis: 4,
            action: AxisAction::Button(6),
        },
        AxisRule {
            bindings: &["zr"],
            from_axis: 5,
            action: AxisAction::Button(7),
        },
        AxisRule {
            bindings: &["ls_up", "ls_down"],
            from_axis: 1,
            action: AxisAction::Remap {
                axis: 1,
                flip: true,
            },
        },
        AxisRule {
            bindings: &["rs_left", "rs_right"],
            from_axis: 2,
            action: AxisAction::Remap {
                axis: 4,
                flip: false,
            },
        },
        AxisRule {
            bindings: &["rs_up", "rs_down"],
            from_axis: 3,
            action: AxisAction::Remap {
                axis: 5,
                flip: true,
            },
        },
    ],
    button_remap: &[
        (0, 1),
        (1, 2),
        (2, 0),
        (3, 3),
        (4, 8),
        (6, 9),
        (7, 10),
        (8, 11),
        (9, 4),
        (10, 5),
    ],
};
