//! Typed model of a Cemu controller profile

use core::fmt;
use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Highest emulated-button id Cemu assigns.
pub const MAX_MAPPING_ID: u8 = 27;

/// Input APIs Cemu accepts in `<api>`.
pub const CONTROLLER_APIS: [&str; 5] = [
    "SDLController",
    "XInput",
    "DirectInput",
    "DSUController",
    "Keyboard",
];

/// Emulated controller types recognised by Cemu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmulatedType {
    /// `Wii U GamePad`
    #[default]
    GamePad,
    /// `Wii U Pro Controller`
    ProController,
    /// `Wii U Classic Controller`
    ClassicController,
    /// `Wii U Classic Controller Pro`
    ClassicControllerPro,
    /// `Wiimote`
    Wiimote,
}

impl EmulatedType {
    /// Every emulated type.
    pub const ALL: [EmulatedType; 5] = [
        Self::GamePad,
        Self::ProController,
        Self::ClassicController,
        Self::ClassicControllerPro,
        Self::Wiimote,
    ];

    /// Text stored in `<type>`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GamePad => "Wii U GamePad",
            Self::ProController => "Wii U Pro Controller",
            Self::ClassicController => "Wii U Classic Controller",
            Self::ClassicControllerPro => "Wii U Classic Controller Pro",
            Self::Wiimote => "Wiimote",
        }
    }

    /// Exact match against the `<type>` text.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == name.trim())
    }
}

impl fmt::Display for EmulatedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deadzone and range of one axis group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSettings {
    /// Deadzone in [0, 1]
    pub deadzone: f32,
    /// Range in (0, 2]
    pub range: f32,
}

impl AxisSettings {
    /// Default for the stick and rotation groups.
    pub const STICK: Self = Self {
        deadzone: 0.15,
        range: 1.0,
    };

    /// Default for the trigger group.
    pub const TRIGGER: Self = Self {
        deadzone: 0.25,
        range: 1.0,
    };

    /// Check both values against their ranges.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value, tagged with `group`.
    pub fn validate(&self, group: &'static str) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.deadzone) {
            return Err(ValidationError::Deadzone {
                group,
                value: self.deadzone,
            });
        }
        if !(self.range > 0.0 && self.range <= 2.0) {
            return Err(ValidationError::Range {
                group,
                value: self.range,
            });
        }
        Ok(())
    }
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self::STICK
    }
}

/// Emulated-button id to Buttons2 code.
///
/// Keyed by mapping id, so an id can appear at most once and iteration is in
/// ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSet(BTreeMap<u8, u64>);

impl MappingSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `mapping_id` to `code`, returning the code it replaced.
    pub fn insert(&mut self, mapping_id: u8, code: u64) -> Option<u64> {
        self.0.insert(mapping_id, code)
    }

    /// Code bound to `mapping_id`.
    pub fn get(&self, mapping_id: u8) -> Option<u64> {
        self.0.get(&mapping_id).copied()
    }

    /// Pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0.iter().map(|(id, code)| (*id, *code))
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no mapping is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self.0.keys().find(|id| !(1..=MAX_MAPPING_ID).contains(*id)) {
            Some(id) => Err(ValidationError::MappingId { id: *id }),
            None => Ok(()),
        }
    }
}

impl FromIterator<(u8, u64)> for MappingSet {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One physical controller bound inside a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerEntry {
    /// Input API, one of [`CONTROLLER_APIS`]
    pub api: String,
    /// Device instance identifier; `"0"` when unknown
    pub uuid: String,
    /// Name shown in Cemu's input settings
    pub display_name: String,
    /// DirectInput product GUID, empty when unknown
    pub product_guid: String,
    /// Rumble strength
    pub rumble: f32,
    /// Whether motion input is enabled
    pub motion: bool,
    /// Left stick group
    pub axis: AxisSettings,
    /// Right stick group
    pub rotation: AxisSettings,
    /// Trigger group
    pub trigger: AxisSettings,
    /// Emulated-button mappings
    pub mappings: MappingSet,
}

impl Default for ControllerEntry {
    fn default() -> Self {
        Self {
            api: "SDLController".to_string(),
            uuid: "0".to_string(),
            display_name: String::new(),
            product_guid: String::new(),
            rumble: 0.0,
            motion: false,
            axis: AxisSettings::STICK,
            rotation: AxisSettings::STICK,
            trigger: AxisSettings::TRIGGER,
            mappings: MappingSet::new(),
        }
    }
}

impl ControllerEntry {
    /// Check the API and every numeric field.
    ///
    /// An empty API is accepted; older profiles leave it blank.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.api.is_empty() && !CONTROLLER_APIS.contains(&self.api.as_str()) {
            return Err(ValidationError::UnknownApi(self.api.clone()));
        }
        self.axis.validate("axis")?;
        self.rotation.validate("rotation")?;
        self.trigger.validate("trigger")?;
        self.mappings.validate()
    }

    /// True when the entry carries a real device pairing.
    pub fn has_device_pairing(&self) -> bool {
        let uuid = self.uuid.trim();
        !uuid.is_empty() && uuid != "0"
    }
}

/// A complete controller profile, one XML file in `controllerProfiles/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CemuProfile {
    /// Emulated controller type
    pub emulated_type: EmulatedType,
    /// Profile name stored in `<profile>`
    pub profile_name: String,
    /// Bound physical controllers; Meridian only ever writes one
    pub controllers: Vec<ControllerEntry>,
}

impl CemuProfile {
    /// First bound controller.
    pub fn first_controller(&self) -> Option<&ControllerEntry> {
        self.controllers.first()
    }

    /// Validate every controller.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.controllers.iter().try_for_each(ControllerEntry::validate)
    }
}

/// Per-title controller assignment, written to `gameProfiles/<title>.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameAssignment {
    /// Title id as found, case preserved
    pub title_id: String,
    /// 1-based player number to profile name
    pub player_to_profile: BTreeMap<u8, String>,
}

impl GameAssignment {
    /// Assignment for `title_id` with no players yet.
    pub fn new(title_id: impl Into<String>) -> Self {
        Self {
            title_id: title_id.into(),
            player_to_profile: BTreeMap::new(),
        }
    }

    /// Assign `profile` to `player`.
    #[must_use]
    pub fn with_player(mut self, player: u8, profile: impl Into<String>) -> Self {
        self.player_to_profile.insert(player, profile.into());
        self
    }

    /// File name of the game profile: dashes removed, lower-cased.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .title_id
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .collect();
        format!("{}.ini", stem.to_lowercase())
    }
}
