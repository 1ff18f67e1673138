//! Per-player binding model

use std::collections::BTreeMap;

/// Input backend selected for a player in the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputApi {
    /// Let the emulator pick; treated as DirectInput by the Cemu writer.
    #[default]
    Auto,
    /// SDL game controller
    Sdl,
    /// XInput
    XInput,
    /// DirectInput
    DirectInput,
    /// Keyboard
    Keyboard,
    /// DSU (cemuhook) motion server
    Dsu,
}

impl InputApi {
    /// Decode the label the settings UI stores.
    ///
    /// Both the short and long spellings are accepted (`SDL` and
    /// `SDLController`, `DSU` and `DSUController`). Unknown labels return
    /// `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let api = match label.trim().to_ascii_lowercase().as_str() {
            "auto" => Self::Auto,
            "sdl" | "sdlcontroller" => Self::Sdl,
            "xinput" => Self::XInput,
            "directinput" => Self::DirectInput,
            "keyboard" => Self::Keyboard,
            "dsu" | "dsucontroller" => Self::Dsu,
            _ => return None,
        };
        Some(api)
    }

    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Sdl => "SDL",
            Self::XInput => "XInput",
            Self::DirectInput => "DirectInput",
            Self::Keyboard => "Keyboard",
            Self::Dsu => "DSU",
        }
    }
}

/// Controller type chosen for a player.
///
/// The Wii U variants are meaningful to Cemu and the Switch variants to Eden;
/// each writer maps the types it does not know to its own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerType {
    /// Wii U GamePad
    GamePad,
    /// Pro Controller (Wii U or Switch)
    ProController,
    /// Wii U Classic Controller
    ClassicController,
    /// Wii Remote
    Wiimote,
    /// Pair of Joy-Cons
    DualJoycons,
    /// Single left Joy-Con
    LeftJoycon,
    /// Single right Joy-Con
    RightJoycon,
    /// Switch handheld mode
    Handheld,
    /// GameCube controller
    GameCubeController,
}

impl ControllerType {
    /// Decode a type label as stored by the settings UI.
    ///
    /// Matching is case-insensitive and accepts the `Wii U ` prefixed forms
    /// Cemu itself writes.
    pub fn from_label(label: &str) -> Option<Self> {
        let ty = match label.trim().to_ascii_lowercase().as_str() {
            "wii u gamepad" | "gamepad" => Self::GamePad,
            "pro controller" | "wii u pro controller" => Self::ProController,
            "classic controller" | "wii u classic controller" => Self::ClassicController,
            "wiimote" => Self::Wiimote,
            "dual joycons" => Self::DualJoycons,
            "left joycon" => Self::LeftJoycon,
            "right joycon" => Self::RightJoycon,
            "handheld" => Self::Handheld,
            "gamecube controller" => Self::GameCubeController,
            _ => return None,
        };
        Some(ty)
    }

    /// Label used by the settings UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::GamePad => "GamePad",
            Self::ProController => "Pro Controller",
            Self::ClassicController => "Classic Controller",
            Self::Wiimote => "Wiimote",
            Self::DualJoycons => "Dual Joycons",
            Self::LeftJoycon => "Left Joycon",
            Self::RightJoycon => "Right Joycon",
            Self::Handheld => "Handheld",
            Self::GameCubeController => "GameCube Controller",
        }
    }
}

/// One player's controller configuration for a single configuration pass.
///
/// Built fresh from the launcher settings on every pass and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingModel {
    /// Whether the player slot is switched on
    pub connected: bool,
    /// Input backend
    pub api: InputApi,
    /// Human-readable device label, possibly carrying a ` [#N]` suffix
    pub device_name: String,
    /// Enumeration index of the device within its backend
    pub device_index: Option<u32>,
    /// Stable device identifier reported by the backend
    pub device_guid: Option<String>,
    /// Controller type; `None` means the writer's default
    pub controller_type: Option<ControllerType>,
    /// Logical control name to raw binding value
    pub bindings: BTreeMap<String, String>,
}

impl BindingModel {
    /// A connected player on `api` with no bindings yet.
    pub fn connected(api: InputApi) -> Self {
        Self {
            connected: true,
            api,
            ..Self::default()
        }
    }

    /// Set the device label.
    #[must_use]
    pub fn with_device(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    /// Set the device index.
    #[must_use]
    pub fn with_device_index(mut self, index: u32) -> Self {
        self.device_index = Some(index);
        self
    }

    /// Set the device GUID.
    #[must_use]
    pub fn with_device_guid(mut self, guid: impl Into<String>) -> Self {
        self.device_guid = Some(guid.into());
        self
    }

    /// Set the controller type.
    #[must_use]
    pub fn with_type(mut self, controller_type: ControllerType) -> Self {
        self.controller_type = Some(controller_type);
        self
    }

    /// Add or replace one binding.
    #[must_use]
    pub fn with_binding(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.bindings.insert(name.into(), value.into());
        self
    }

    /// True when this player should produce output: connected with at least
    /// one binding.
    pub fn is_active(&self) -> bool {
        self.connected && !self.bindings.is_empty()
    }

    /// Non-empty trimmed device GUID.
    pub fn guid(&self) -> Option<&str> {
        self.device_guid
            .as_deref()
            .map(str::trim)
            .filter(|guid| !guid.is_empty())
    }

    /// Whether the `motion` binding selects a motion source.
    pub fn motion_enabled(&self) -> bool {
        self.bindings.iter().any(|(name, value)| {
            name.trim().eq_ignore_ascii_case("motion") && {
                let value = value.trim();
                !value.is_empty() && !value.eq_ignore_ascii_case("none")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_labels_accept_both_spellings() {
        assert_eq!(InputApi::from_label("SDLController"), Some(InputApi::Sdl));
        assert_eq!(InputApi::from_label("sdl"), Some(InputApi::Sdl));
        assert_eq!(InputApi::from_label("DSU"), Some(InputApi::Dsu));
        assert_eq!(InputApi::from_label("Joystick"), None);
    }

    #[test]
    fn test_type_labels_accept_wii_u_prefix() {
        assert_eq!(
            ControllerType::from_label("Wii U Pro Controller"),
            Some(ControllerType::ProController)
        );
        assert_eq!(
            ControllerType::from_label("Gamepad"),
            Some(ControllerType::GamePad)
        );
        assert_eq!(
            ControllerType::from_label("GameCube Controller"),
            Some(ControllerType::GameCubeController)
        );
        assert_eq!(ControllerType::from_label("Balance Board"), None);
    }

    #[test]
    fn test_is_active_requires_connection_and_bindings() {
        let empty = BindingModel::connected(InputApi::Sdl);
        assert!(!empty.is_active());

        let bound = empty.clone().with_binding("a", "Button 0");
        assert!(bound.is_active());

        let disconnected = BindingModel {
            connected: false,
            ..bound
        };
        assert!(!disconnected.is_active());
    }

    #[test]
    fn test_motion_enabled() {
        let model = BindingModel::connected(InputApi::Sdl).with_binding("motion", "Gyro");
        assert!(model.motion_enabled());

        let model = BindingModel::connected(InputApi::Sdl).with_binding("Motion", "None");
        assert!(!model.motion_enabled());
    }

    #[test]
    fn test_blank_guid_is_absent() {
        let model = BindingModel::connected(InputApi::Sdl).with_device_guid("  ");
        assert_eq!(model.guid(), None);
    }
}
