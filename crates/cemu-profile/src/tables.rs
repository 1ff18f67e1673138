//! Logical binding name to Cemu mapping id tables
//!
//! Mapping ids are Cemu's emulated-button ids (1 = A ... 25 = R-stick press
//! on the GamePad layout). The Pro Controller numbers its stick slots
//! differently; that layout is an override table merged over the base table,
//! so supporting another emulated type only means adding its table.

use std::collections::BTreeMap;

use meridian_input::{ControllerType, InputApi};

use crate::correction::{DUALSENSE_DIRECTINPUT, DeviceCorrection};
use crate::models::EmulatedType;

type NameTable = &'static [(&'static str, u8)];
type IdTable = &'static [(u8, &'static str)];

const BASE_BIND_TO_MAPPING: NameTable = &[
    // Face buttons, Nintendo and PlayStation names
    ("a", 1),
    ("b", 2),
    ("x", 3),
    ("y", 4),
    ("cross", 1),
    ("circle", 2),
    ("square", 3),
    ("triangle", 4),
    // Shoulders and triggers
    ("l", 5),
    ("r", 6),
    ("zl", 7),
    ("zr", 8),
    ("lb", 5),
    ("rb", 6),
    ("lt", 7),
    ("rt", 8),
    ("l1", 5),
    ("r1", 6),
    ("l2", 7),
    ("r2", 8),
    ("sl", 5),
    ("sr", 6),
    ("sl_l", 5),
    ("sr_l", 6),
    ("sl_r", 5),
    ("sr_r", 6),
    ("l_zl", 7),
    ("z", 7),
    // Menu
    ("plus", 9),
    ("minus", 10),
    ("home", 11),
    ("start", 9),
    ("back", 10),
    ("guide", 11),
    ("options", 9),
    ("share", 10),
    ("ps", 11),
    ("create", 10),
    ("plus_minus", 9),
    // D-pad
    ("dp_up", 12),
    ("dp_down", 13),
    ("dp_left", 14),
    ("dp_right", 15),
    // Left stick
    ("ls_down", 16),
    ("ls_up", 17),
    ("ls_left", 18),
    ("ls_right", 19),
    ("ls_click", 24),
    ("ls_press", 24),
    ("l3", 24),
    // Right stick
    ("rs_down", 20),
    ("rs_up", 21),
    ("rs_left", 22),
    ("rs_right", 23),
    ("rs_click", 25),
    ("rs_press", 25),
    ("r3", 25),
];

const PRO_BIND_TO_MAPPING: NameTable = &[
    ("ls_click", 16),
    ("ls_press", 16),
    ("l3", 16),
    ("rs_click", 17),
    ("rs_press", 17),
    ("r3", 17),
    ("ls_up", 18),
    ("ls_down", 19),
    ("ls_left", 20),
    ("ls_right", 21),
    ("rs_up", 22),
    ("rs_down", 23),
    ("rs_left", 24),
    ("rs_right", 25),
];

const BASE_MAPPING_TO_BIND: IdTable = &[
    (1, "a"),
    (2, "b"),
    (3, "x"),
    (4, "y"),
    (5, "l"),
    (6, "r"),
    (7, "zl"),
    (8, "zr"),
    (9, "plus"),
    (10, "minus"),
    (11, "home"),
    (12, "dp_up"),
    (13, "dp_down"),
    (14, "dp_left"),
    (15, "dp_right"),
    (16, "ls_down"),
    (17, "ls_up"),
    (18, "ls_left"),
    (19, "ls_right"),
    (20, "rs_down"),
    (21, "rs_up"),
    (22, "rs_left"),
    (23, "rs_right"),
    (24, "ls_click"),
    (25, "rs_click"),
];

const PRO_MAPPING_TO_BIND: IdTable = &[
    (16, "ls_click"),
    (17, "rs_click"),
    (18, "ls_up"),
    (19, "ls_down"),
    (20, "ls_left"),
    (21, "ls_right"),
    (22, "rs_up"),
    (23, "rs_down"),
    (24, "rs_left"),
    (25, "rs_right"),
];

const API_TABLE: &[(InputApi, &str)] = &[
    (InputApi::Auto, "DirectInput"),
    (InputApi::DirectInput, "DirectInput"),
    (InputApi::Sdl, "SDLController"),
    (InputApi::XInput, "XInput"),
    (InputApi::Keyboard, "Keyboard"),
    (InputApi::Dsu, "DSUController"),
];

/// API string used when the launcher API has no entry.
pub const FALLBACK_API: &str = "DirectInput";

const TYPE_TABLE: &[(ControllerType, EmulatedType)] = &[
    (ControllerType::GamePad, EmulatedType::GamePad),
    (ControllerType::ProController, EmulatedType::ProController),
    (ControllerType::ClassicController, EmulatedType::ClassicController),
    (ControllerType::Wiimote, EmulatedType::Wiimote),
];

/// The complete set of lookup tables used by conversion.
#[derive(Debug, Clone, Copy)]
pub struct BindingTables {
    base: NameTable,
    overrides: &'static [(EmulatedType, NameTable)],
    reverse_base: IdTable,
    reverse_overrides: &'static [(EmulatedType, IdTable)],
    corrections: &'static [DeviceCorrection],
}

/// Tables shipped with Meridian.
pub static STANDARD_TABLES: BindingTables = BindingTables {
    base: BASE_BIND_TO_MAPPING,
    overrides: &[(EmulatedType::ProController, PRO_BIND_TO_MAPPING)],
    reverse_base: BASE_MAPPING_TO_BIND,
    reverse_overrides: &[(EmulatedType::ProController, PRO_MAPPING_TO_BIND)],
    corrections: &[DUALSENSE_DIRECTINPUT],
};

impl Default for BindingTables {
    fn default() -> Self {
        STANDARD_TABLES
    }
}

impl BindingTables {
    /// Replace the device correction list.
    #[must_use]
    pub fn with_corrections(mut self, corrections: &'static [DeviceCorrection]) -> Self {
        self.corrections = corrections;
        self
    }

    /// Logical name to mapping id for `emulated_type`; override entries win.
    pub fn forward(&self, emulated_type: EmulatedType) -> BTreeMap<&'static str, u8> {
        let mut table: BTreeMap<_, _> = self.base.iter().copied().collect();
        for (_, overrides) in self.overrides.iter().filter(|(ty, _)| *ty == emulated_type) {
            table.extend(overrides.iter().copied());
        }
        table
    }

    /// Mapping id to canonical logical name for `emulated_type`.
    pub fn reverse(&self, emulated_type: EmulatedType) -> BTreeMap<u8, &'static str> {
        let mut table: BTreeMap<_, _> = self.reverse_base.iter().copied().collect();
        for (_, overrides) in self
            .reverse_overrides
            .iter()
            .filter(|(ty, _)| *ty == emulated_type)
        {
            table.extend(overrides.iter().copied());
        }
        table
    }

    /// First correction covering the device, if any.
    pub fn correction_for(
        &self,
        api: &str,
        emulated_type: EmulatedType,
        device_name: &str,
    ) -> Option<&'static DeviceCorrection> {
        self.corrections
            .iter()
            .find(|c| c.applies_to(api, emulated_type, device_name))
    }
}

/// Cemu API string for a launcher API.
pub fn api_name(api: InputApi) -> &'static str {
    API_TABLE
        .iter()
        .find(|(from, _)| *from == api)
        .map_or(FALLBACK_API, |(_, name)| *name)
}

/// Cemu emulated type for a launcher controller type. Types Cemu has no
/// equivalent for, and an absent type, become the GamePad.
pub fn emulated_type_for(controller_type: Option<ControllerType>) -> EmulatedType {
    controller_type
        .and_then(|ty| TYPE_TABLE.iter().find(|(from, _)| *from == ty))
        .map_or(EmulatedType::GamePad, |(_, to)| *to)
}
